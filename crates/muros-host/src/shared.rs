//! Thread-safe shared parameter store.
//!
//! [`WallParams`] lives for the lifetime of a processor instance and is
//! accessible from both a control thread (automation, GUI, CLI) and the
//! audio thread. Each parameter is a single atomic ordinal, so the audio
//! thread's per-block snapshot is lock-free and tear-free.

use muros_core::{ChainSettings, WallCount, WallMaterial};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Metadata for a discrete-choice parameter, as exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceParam {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for hardware displays, max 8 characters.
    pub short_name: &'static str,
    /// Stable numeric ID for automation and persistence. Never changes.
    pub id: u32,
    /// Human-readable stable ID for presets and serialization.
    pub string_id: &'static str,
    /// Display labels for each choice, in ordinal order.
    pub labels: &'static [&'static str],
    /// Default choice ordinal.
    pub default_index: u32,
}

impl ChoiceParam {
    /// Number of choices.
    pub fn count(&self) -> u32 {
        self.labels.len() as u32
    }

    /// Clamps an ordinal to the valid choice range.
    pub fn clamp(&self, index: u32) -> u32 {
        index.min(self.count() - 1)
    }
}

/// The "Material" parameter: 4 named wall materials, default Glass.
pub const MATERIAL_PARAM: ChoiceParam = ChoiceParam {
    name: "Material",
    short_name: "Material",
    id: 100,
    string_id: "wall_material",
    labels: &["Glass", "Wood", "Drywall", "Concrete"],
    default_index: 0,
};

/// The "Walls In Between" parameter: 5 counts "0".."4", default "0".
pub const WALLS_PARAM: ChoiceParam = ChoiceParam {
    name: "Walls In Between",
    short_name: "Walls",
    id: 101,
    string_id: "wall_count",
    labels: &["0", "1", "2", "3", "4"],
    default_index: 0,
};

/// All parameters the engine exposes, in index order.
pub const PARAMS: [ChoiceParam; 2] = [MATERIAL_PARAM, WALLS_PARAM];

struct WallParamsData {
    material: AtomicU32,
    walls: AtomicU32,
}

/// Shared parameter values, clonable into any thread.
///
/// Writers clamp ordinals to the descriptor range; readers snapshot both
/// values into an immutable [`ChainSettings`] once per block, so a block
/// never observes a half-updated parameter set.
#[derive(Clone)]
pub struct WallParams {
    inner: Arc<WallParamsData>,
}

impl WallParams {
    /// Creates a store holding each parameter's default.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(WallParamsData {
                material: AtomicU32::new(MATERIAL_PARAM.default_index),
                walls: AtomicU32::new(WALLS_PARAM.default_index),
            }),
        }
    }

    /// Current material.
    pub fn material(&self) -> WallMaterial {
        WallMaterial::from_index(self.inner.material.load(Ordering::Acquire) as usize)
    }

    /// Sets the material.
    pub fn set_material(&self, material: WallMaterial) {
        self.inner
            .material
            .store(material.index() as u32, Ordering::Release);
    }

    /// Sets the material by host ordinal, clamped to the valid range.
    pub fn set_material_index(&self, index: u32) {
        self.inner
            .material
            .store(MATERIAL_PARAM.clamp(index), Ordering::Release);
    }

    /// Current material ordinal.
    pub fn material_index(&self) -> u32 {
        self.inner.material.load(Ordering::Acquire)
    }

    /// Current wall count.
    pub fn walls(&self) -> WallCount {
        WallCount::from_index(self.inner.walls.load(Ordering::Acquire) as usize)
    }

    /// Sets the wall count.
    pub fn set_walls(&self, walls: WallCount) {
        self.inner
            .walls
            .store(walls.index() as u32, Ordering::Release);
    }

    /// Sets the wall count by host ordinal, clamped to the valid range.
    pub fn set_walls_index(&self, index: u32) {
        self.inner
            .walls
            .store(WALLS_PARAM.clamp(index), Ordering::Release);
    }

    /// Current wall-count ordinal.
    pub fn walls_index(&self) -> u32 {
        self.inner.walls.load(Ordering::Acquire)
    }

    /// Resolves an immutable settings snapshot for one block.
    ///
    /// One atomic load per parameter; the result is used consistently for
    /// the entire block.
    pub fn snapshot(&self) -> ChainSettings {
        ChainSettings::resolve(self.material(), self.walls())
    }
}

impl Default for WallParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muros_core::Slope;

    #[test]
    fn defaults_match_descriptors() {
        let params = WallParams::new();
        assert_eq!(params.material_index(), MATERIAL_PARAM.default_index);
        assert_eq!(params.walls_index(), WALLS_PARAM.default_index);
        assert_eq!(params.material(), WallMaterial::Glass);
        assert_eq!(params.walls(), WallCount::Zero);
    }

    #[test]
    fn descriptor_labels_cover_all_ordinals() {
        assert_eq!(MATERIAL_PARAM.count() as usize, WallMaterial::ALL.len());
        assert_eq!(WALLS_PARAM.count() as usize, WallCount::ALL.len());
        for (material, label) in WallMaterial::ALL.iter().zip(MATERIAL_PARAM.labels) {
            assert_eq!(material.label(), *label);
        }
    }

    #[test]
    fn param_ids_are_unique() {
        assert_ne!(MATERIAL_PARAM.id, WALLS_PARAM.id);
        assert_ne!(MATERIAL_PARAM.string_id, WALLS_PARAM.string_id);
    }

    #[test]
    fn set_by_index_clamps() {
        let params = WallParams::new();

        params.set_material_index(99);
        assert_eq!(params.material(), WallMaterial::Concrete);

        params.set_walls_index(99);
        assert_eq!(params.walls(), WallCount::Four);
    }

    #[test]
    fn snapshot_resolves_both_parameters() {
        let params = WallParams::new();
        params.set_material(WallMaterial::Wood);
        params.set_walls(WallCount::Two);

        let settings = params.snapshot();
        assert_eq!(settings.walls, WallCount::Two);
        assert_eq!(settings.slope, Slope::Db24);
    }

    #[test]
    fn clones_share_storage() {
        let params = WallParams::new();
        let handle = params.clone();

        handle.set_walls(WallCount::Three);
        assert_eq!(params.walls(), WallCount::Three);
    }
}
