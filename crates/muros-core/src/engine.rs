//! Settings resolution and per-block chain reconfiguration.

use crate::biquad::BiquadCoefficients;
use crate::butterworth::{cascade_order, section_lowpass};
use crate::cascade::{FilterCascade, MAX_STAGES};
use crate::wall::{ChainSettings, WallCount};

/// Cache key for the designed coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DesignKey {
    walls: WallCount,
    sample_rate_bits: u32,
}

/// The wall-transmission filter engine: two independent cascades (left,
/// right) plus the logic that maps [`ChainSettings`] onto them.
///
/// [`apply_settings`](Self::apply_settings) runs once per reconfiguration
/// event — stream start and every processed block. Designed coefficients
/// are cached per (wall count, sample rate), so the steady state performs
/// no design work and no allocation in the audio path.
#[derive(Debug, Clone)]
pub struct WallFilterEngine {
    left: FilterCascade,
    right: FilterCascade,
    sample_rate: f32,
    cached: Option<DesignKey>,
    sections: [BiquadCoefficients; MAX_STAGES],
}

impl WallFilterEngine {
    /// Creates an engine with fully bypassed chains.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            left: FilterCascade::new(),
            right: FilterCascade::new(),
            sample_rate,
            cached: None,
            sections: [BiquadCoefficients::PASSTHROUGH; MAX_STAGES],
        }
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Updates the sample rate and invalidates the designed coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cached = None;
    }

    /// Left-channel cascade.
    pub fn left(&self) -> &FilterCascade {
        &self.left
    }

    /// Right-channel cascade.
    pub fn right(&self) -> &FilterCascade {
        &self.right
    }

    /// Reconfigures both cascades from a resolved settings snapshot.
    ///
    /// All stages are bypassed first. With the no-walls sentinel that is
    /// the whole transition; otherwise the leading `slope.stages()` slots
    /// of both channels are activated with the designed sections. A design
    /// failure (cutoff at or above Nyquist, non-finite coefficients)
    /// leaves both chains bypassed — pass-through, never a glitch.
    pub fn apply_settings(&mut self, settings: ChainSettings) {
        self.left.bypass_all();
        self.right.bypass_all();

        if settings.walls.is_sentinel() {
            return;
        }

        let cutoff_hz = settings.walls.cutoff_hz();
        let key = DesignKey {
            walls: settings.walls,
            sample_rate_bits: self.sample_rate.to_bits(),
        };

        if self.cached != Some(key) {
            let order = cascade_order(cutoff_hz);
            for index in 0..MAX_STAGES {
                match section_lowpass(cutoff_hz, self.sample_rate, order, index) {
                    Ok(coeffs) => self.sections[index] = coeffs,
                    Err(_err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            cutoff_hz,
                            sample_rate = self.sample_rate,
                            error = %_err,
                            "filter design failed, cascade stays bypassed"
                        );
                        self.cached = None;
                        return;
                    }
                }
            }
            self.cached = Some(key);
        }

        for index in 0..settings.slope.stages() {
            self.left.activate(index, self.sections[index]);
            self.right.activate(index, self.sections[index]);
        }
    }

    /// Processes one stereo block in place, left and right independently.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.left.process_block_inplace(left);
        self.right.process_block_inplace(right);
    }

    /// Mono fallback: processes a single channel through the left cascade.
    pub fn process_mono(&mut self, buffer: &mut [f32]) {
        self.left.process_block_inplace(buffer);
    }

    /// Clears both cascades' delay lines. Configuration is untouched.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }
}
