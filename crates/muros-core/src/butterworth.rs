//! High-order Butterworth low-pass design.
//!
//! The filter is realized as a cascade of second-order sections (plus a
//! leading first-order section for odd orders). Section Q values come from
//! the Butterworth pole angles; each section is the bilinear-transform
//! low-pass biquad at the requested cutoff.

use crate::biquad::BiquadCoefficients;
use core::f32::consts::PI;
use libm::{cosf, sinf, tanf};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Errors from the filter-design routines.
///
/// Design failures must never leak NaN/Inf coefficients into the audio
/// path; callers recover by leaving their cascade bypassed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignError {
    /// Cutoff is not strictly between 0 Hz and Nyquist.
    CutoffOutOfRange {
        /// Requested cutoff in Hz.
        cutoff_hz: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist_hz: f32,
    },
    /// The requested filter order is zero.
    InvalidOrder(usize),
    /// A computed coefficient was NaN or infinite.
    NonFiniteCoefficients,
}

impl core::fmt::Display for DesignError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::CutoffOutOfRange {
                cutoff_hz,
                nyquist_hz,
            } => write!(
                f,
                "cutoff {cutoff_hz} Hz outside (0, {nyquist_hz}) Hz design range"
            ),
            Self::InvalidOrder(order) => write!(f, "invalid filter order {order}"),
            Self::NonFiniteCoefficients => write!(f, "design produced non-finite coefficients"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DesignError {}

/// Filter order used by the wall cascade: `2 * (cutoff_hz + 2)`, truncated.
///
/// The order is derived from the cutoff frequency, not from the number of
/// stages the cascade will activate; the two quantities are independent.
pub fn cascade_order(cutoff_hz: f32) -> usize {
    2 * (cutoff_hz as usize + 2)
}

/// Number of sections a design of the given order produces: `ceil(order/2)`.
pub fn section_count(order: usize) -> usize {
    order.div_ceil(2)
}

fn validate(cutoff_hz: f32, sample_rate: f32, order: usize) -> Result<(), DesignError> {
    if order == 0 {
        return Err(DesignError::InvalidOrder(order));
    }
    let nyquist_hz = sample_rate * 0.5;
    if !(cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
        return Err(DesignError::CutoffOutOfRange {
            cutoff_hz,
            nyquist_hz,
        });
    }
    Ok(())
}

/// Q of one second-order section of an order-N Butterworth cascade.
///
/// Even N, section i: `1 / (2 cos((2i+1)π / 2N))`.
/// Odd N, second-order section i (0-based, after the first-order section):
/// `1 / (2 cos((i+1)π / N))`.
fn section_q(order: usize, index: usize) -> f32 {
    if order % 2 == 0 {
        1.0 / (2.0 * cosf((2 * index + 1) as f32 * PI / (2 * order) as f32))
    } else {
        1.0 / (2.0 * cosf((index + 1) as f32 * PI / order as f32))
    }
}

/// Bilinear-transform low-pass biquad (RBJ cookbook form).
fn lowpass_section(cutoff_hz: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = 2.0 * PI * cutoff_hz / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    BiquadCoefficients::normalized(
        (1.0 - cos_omega) / 2.0,
        1.0 - cos_omega,
        (1.0 - cos_omega) / 2.0,
        1.0 + alpha,
        -2.0 * cos_omega,
        1.0 - alpha,
    )
}

/// First-order low-pass expressed as a degenerate biquad (b2 = a2 = 0).
fn first_order_section(cutoff_hz: f32, sample_rate: f32) -> BiquadCoefficients {
    let n = tanf(PI * cutoff_hz / sample_rate);
    let inv = 1.0 / (1.0 + n);

    BiquadCoefficients {
        b0: n * inv,
        b1: n * inv,
        b2: 0.0,
        a1: (n - 1.0) * inv,
        a2: 0.0,
    }
}

/// Computes section `index` of an order-`order` Butterworth low-pass
/// without allocating.
///
/// `index` must be below [`section_count`] for the order. For odd orders,
/// index 0 is the first-order section.
pub fn section_lowpass(
    cutoff_hz: f32,
    sample_rate: f32,
    order: usize,
    index: usize,
) -> Result<BiquadCoefficients, DesignError> {
    validate(cutoff_hz, sample_rate, order)?;
    debug_assert!(index < section_count(order), "section index out of range");

    let coeffs = if order % 2 == 1 {
        if index == 0 {
            first_order_section(cutoff_hz, sample_rate)
        } else {
            lowpass_section(cutoff_hz, section_q(order, index - 1), sample_rate)
        }
    } else {
        lowpass_section(cutoff_hz, section_q(order, index), sample_rate)
    };

    if coeffs.is_finite() {
        Ok(coeffs)
    } else {
        Err(DesignError::NonFiniteCoefficients)
    }
}

/// Designs a full order-`order` Butterworth low-pass as `ceil(order/2)`
/// cascaded sections.
///
/// The engine itself only consumes the leading sections through
/// [`section_lowpass`]; this entry point exists for callers that need the
/// complete cascade.
pub fn design_lowpass(
    cutoff_hz: f32,
    sample_rate: f32,
    order: usize,
) -> Result<Vec<BiquadCoefficients>, DesignError> {
    validate(cutoff_hz, sample_rate, order)?;

    let mut sections = Vec::with_capacity(section_count(order));
    for index in 0..section_count(order) {
        sections.push(section_lowpass(cutoff_hz, sample_rate, order, index)?);
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biquad::Biquad;

    #[test]
    fn cascade_order_tracks_cutoff() {
        assert_eq!(cascade_order(7500.0), 15004);
        assert_eq!(cascade_order(3000.0), 6004);
        assert_eq!(cascade_order(1500.0), 3004);
        assert_eq!(cascade_order(750.0), 1504);
        assert_eq!(cascade_order(100.0), 204);
    }

    #[test]
    fn section_count_is_ceil_half() {
        assert_eq!(section_count(4), 2);
        assert_eq!(section_count(5), 3);
        assert_eq!(section_count(204), 102);
    }

    #[test]
    fn rejects_cutoff_at_or_above_nyquist() {
        assert!(matches!(
            design_lowpass(24000.0, 48000.0, 4),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
        assert!(matches!(
            design_lowpass(30000.0, 48000.0, 4),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_cutoff() {
        assert!(matches!(
            design_lowpass(0.0, 48000.0, 4),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
        assert!(matches!(
            design_lowpass(-100.0, 48000.0, 4),
            Err(DesignError::CutoffOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_order() {
        assert!(matches!(
            design_lowpass(1000.0, 48000.0, 0),
            Err(DesignError::InvalidOrder(0))
        ));
    }

    #[test]
    fn fourth_order_q_values() {
        // Order-4 Butterworth: Q = 0.5412 and 1.3066.
        let q0 = section_q(4, 0);
        let q1 = section_q(4, 1);
        assert!((q0 - 0.5412).abs() < 1e-3, "q0 = {q0}");
        assert!((q1 - 1.3066).abs() < 1e-3, "q1 = {q1}");
    }

    #[test]
    fn high_order_sections_approach_critical_damping() {
        // At order 3004 the leading pole pairs sit almost on the real
        // axis, so section Q approaches 0.5.
        let q = section_q(3004, 0);
        assert!((q - 0.5).abs() < 1e-4, "q = {q}");
    }

    #[test]
    fn sections_pass_dc() {
        let sections = design_lowpass(1500.0, 48000.0, 8).unwrap();
        assert_eq!(sections.len(), 4);

        let mut cascade: Vec<Biquad> = sections
            .iter()
            .map(|&c| {
                let mut b = Biquad::new();
                b.set_coefficients(c);
                b
            })
            .collect();

        let mut output = 0.0;
        for _ in 0..2000 {
            output = cascade.iter_mut().fold(1.0, |s, b| b.process(s));
        }
        assert!((output - 1.0).abs() < 0.05, "DC gain {output}");
    }

    #[test]
    fn odd_order_leads_with_first_order_section() {
        let sections = design_lowpass(1000.0, 48000.0, 5).unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].b2, 0.0);
        assert_eq!(sections[0].a2, 0.0);
        assert_ne!(sections[1].b2, 0.0);
    }

    #[test]
    fn all_sections_finite_at_extremes() {
        for &(cutoff, sr) in &[(20.0, 44100.0), (100.0, 8000.0), (7500.0, 192000.0)] {
            let order = cascade_order(cutoff);
            for index in 0..4 {
                let coeffs = section_lowpass(cutoff, sr, order, index).unwrap();
                assert!(coeffs.is_finite(), "cutoff {cutoff} sr {sr} index {index}");
            }
        }
    }
}
