//! Host adapter for the muros wall filter.
//!
//! Sits between a host (plugin shell, CLI, offline renderer) and the
//! `muros-core` engine:
//!
//! - [`WallParams`] - lock-free shared parameter store with choice
//!   descriptors for host automation
//! - [`WallProcessor`] - the block-processing entry point: snapshot
//!   parameters, reconfigure, stream channels through the cascades
//! - [`save_state`] / [`load_state`] - JSON persistence of the two
//!   parameter ordinals (and nothing else)

mod processor;
mod shared;
mod state;

pub use processor::WallProcessor;
pub use shared::{ChoiceParam, MATERIAL_PARAM, PARAMS, WALLS_PARAM, WallParams};
pub use state::{StateError, load_state, save_state};
