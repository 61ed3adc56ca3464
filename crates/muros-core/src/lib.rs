//! muros core - wall-transmission low-pass filter engine
//!
//! Simulates sound heard through intervening walls: two discrete controls
//! (wall material, wall count) drive a cascade of up to four second-order
//! Butterworth low-pass stages per stereo channel.
//!
//! # Building Blocks
//!
//! - [`Biquad`] / [`BiquadCoefficients`] - second-order IIR stage
//! - [`design_lowpass`] / [`section_lowpass`] - Butterworth section design
//! - [`FilterCascade`] - four bypassable stages in series, one per channel
//! - [`WallFilterEngine`] - settings resolution and per-block chain update
//! - [`WallMaterial`], [`WallCount`], [`Slope`], [`ChainSettings`] - the
//!   control-parameter model
//!
//! # Control Flow
//!
//! Once per block (and at stream start) the caller resolves a
//! [`ChainSettings`] snapshot and hands it to
//! [`WallFilterEngine::apply_settings`]: all stages reset to bypassed,
//! then — unless the no-walls sentinel is selected — the leading
//! `slope.stages()` slots of both channels are activated with sections
//! designed for the wall count's cutoff at the current sample rate.
//! Designed coefficients are cached per (wall count, sample rate), so the
//! steady-state audio path allocates nothing.
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible; disable the default `std` feature.
//! Math comes from `libm`. The optional `tracing` feature adds a warning
//! when a design failure forces the cascade into bypass.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod butterworth;
pub mod cascade;
pub mod engine;
pub mod wall;

// Re-export main types at crate root
pub use biquad::{Biquad, BiquadCoefficients};
pub use butterworth::{DesignError, cascade_order, design_lowpass, section_count, section_lowpass};
pub use cascade::{FilterCascade, MAX_STAGES};
pub use engine::WallFilterEngine;
pub use wall::{ChainSettings, Slope, WallCount, WallMaterial};
