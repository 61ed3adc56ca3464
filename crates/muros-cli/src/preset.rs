//! TOML preset loading.

use anyhow::Context;
use muros_core::WallMaterial;
use muros_host::WallParams;
use serde::Deserialize;
use std::path::Path;

/// A named wall configuration loaded from a TOML file.
///
/// ```toml
/// name = "rehearsal room next door"
/// material = "concrete"
/// walls = 2
/// ```
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Optional display name.
    pub name: Option<String>,
    /// Wall material label (case-insensitive).
    pub material: String,
    /// Wall count, 0-4.
    pub walls: u32,
}

impl Preset {
    /// Loads a preset from a TOML file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing preset {}", path.display()))
    }

    /// Applies the preset to a parameter store.
    pub fn apply(&self, params: &WallParams) -> anyhow::Result<()> {
        let material = WallMaterial::from_label(&self.material)
            .with_context(|| format!("unknown material '{}'", self.material))?;
        anyhow::ensure!(self.walls <= 4, "wall count {} out of range 0-4", self.walls);

        params.set_material(material);
        params.set_walls_index(self.walls);
        Ok(())
    }
}
