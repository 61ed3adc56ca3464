//! Block-processing entry point.

use crate::shared::WallParams;
use muros_core::WallFilterEngine;

/// Drives the wall filter engine from shared parameters, one block at a
/// time.
///
/// The processor owns the engine; the [`WallParams`] handle is shared
/// with whatever control surface writes the parameters. Every `process`
/// call snapshots the parameters, reconfigures the engine, and streams
/// the channels through it in place.
pub struct WallProcessor {
    engine: WallFilterEngine,
    params: WallParams,
}

impl WallProcessor {
    /// Creates a processor around a shared parameter store.
    pub fn new(params: WallParams, sample_rate: f32) -> Self {
        Self {
            engine: WallFilterEngine::new(sample_rate),
            params,
        }
    }

    /// Prepares for a new stream: re-derives design data for the sample
    /// rate, clears filter state, and runs one settings resolution.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.engine.set_sample_rate(sample_rate);
        self.engine.reset();
        let settings = self.params.snapshot();
        self.engine.apply_settings(settings);
        tracing::debug!(
            sample_rate,
            walls = ?settings.walls,
            slope = ?settings.slope,
            "prepared wall processor"
        );
    }

    /// Processes one block of planar channel buffers in place.
    ///
    /// `input_channels` is how many leading channels carry input audio.
    /// Output channels beyond that count are cleared to silence — a host
    /// may hand over buffers containing garbage. Channel 0 runs through
    /// the left cascade and channel 1 through the right; with a single
    /// input channel the processor falls back to mono.
    pub fn process(&mut self, channels: &mut [&mut [f32]], input_channels: usize) {
        let clear_from = input_channels.min(channels.len());
        for channel in &mut channels[clear_from..] {
            channel.fill(0.0);
        }

        self.engine.apply_settings(self.params.snapshot());

        if input_channels >= 2 && channels.len() >= 2 {
            let (head, tail) = channels.split_at_mut(1);
            self.engine.process_block(&mut *head[0], &mut *tail[0]);
        } else if input_channels >= 1 && !channels.is_empty() {
            self.engine.process_mono(&mut *channels[0]);
        }
    }

    /// The shared parameter store.
    pub fn params(&self) -> &WallParams {
        &self.params
    }

    /// The underlying engine (read-only, for inspection).
    pub fn engine(&self) -> &WallFilterEngine {
        &self.engine
    }

    /// Clears filter state without reconfiguring.
    pub fn reset(&mut self) {
        self.engine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muros_core::{WallCount, WallMaterial};

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (core::f32::consts::TAU * freq * n as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn extra_output_channels_are_cleared() {
        let params = WallParams::new();
        params.set_material(WallMaterial::Wood);
        params.set_walls(WallCount::Two);

        let mut processor = WallProcessor::new(params, 48000.0);
        processor.prepare(48000.0);

        let mut ch0 = sine(440.0, 48000.0, 256);
        let mut ch1 = sine(440.0, 48000.0, 256);
        let mut ch2 = vec![0.7f32; 256]; // garbage from the host
        let mut ch3 = vec![-0.3f32; 256];
        let mut channels: [&mut [f32]; 4] = [&mut ch0, &mut ch1, &mut ch2, &mut ch3];

        processor.process(&mut channels, 2);

        assert!(channels[2].iter().all(|s| *s == 0.0));
        assert!(channels[3].iter().all(|s| *s == 0.0));
        // Audio channels were processed, not cleared.
        assert!(channels[0].iter().any(|s| *s != 0.0));
    }

    #[test]
    fn process_picks_up_parameter_changes() {
        let params = WallParams::new();
        let mut processor = WallProcessor::new(params.clone(), 48000.0);
        processor.prepare(48000.0);

        // Default is the no-walls sentinel: pass-through.
        let tone = sine(10000.0, 48000.0, 256);
        let mut left = tone.clone();
        let mut right = tone.clone();
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut channels, 2);
        assert_eq!(*channels[0], tone[..]);

        // A control-thread write lands on the very next block.
        params.set_walls(WallCount::Four);
        params.set_material(WallMaterial::Concrete);
        let mut left = tone.clone();
        let mut right = tone.clone();
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        processor.process(&mut channels, 2);
        assert_ne!(*channels[0], tone[..]);
        assert_eq!(processor.engine().left().active_count(), 4);
    }

    #[test]
    fn mono_fallback_uses_left_cascade() {
        let params = WallParams::new();
        params.set_material(WallMaterial::Glass);
        params.set_walls(WallCount::Four);

        let mut processor = WallProcessor::new(params, 48000.0);
        processor.prepare(48000.0);

        let tone = sine(8000.0, 48000.0, 256);
        let mut mono = tone.clone();
        let mut channels: [&mut [f32]; 1] = [&mut mono];
        processor.process(&mut channels, 1);

        assert_ne!(*channels[0], tone[..]);
        assert_eq!(processor.engine().left().active_count(), 1);
    }

    #[test]
    fn prepare_reapplies_design_for_new_sample_rate() {
        let params = WallParams::new();
        params.set_material(WallMaterial::Wood);
        params.set_walls(WallCount::One);

        let mut processor = WallProcessor::new(params, 48000.0);
        processor.prepare(48000.0);
        let at_48k = processor.engine().left().stage_coefficients(0);

        processor.prepare(96000.0);
        let at_96k = processor.engine().left().stage_coefficients(0);
        assert_ne!(at_48k, at_96k);
    }
}
