//! Wall parameters and their mapping onto the filter cascade.
//!
//! Two discrete controls drive the engine: the material of the walls and
//! how many walls sit between source and listener. The wall count selects
//! the cutoff frequency; the material ordinal selects the cascade slope.

/// Wall material between sound source and listener.
///
/// The material's ordinal selects the cascade [`Slope`]; it has no effect
/// on the cutoff frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallMaterial {
    /// Glass wall.
    Glass,
    /// Wooden wall.
    Wood,
    /// Drywall partition.
    Drywall,
    /// Concrete wall.
    Concrete,
}

impl WallMaterial {
    /// All materials, in parameter order.
    pub const ALL: [Self; 4] = [Self::Glass, Self::Wood, Self::Drywall, Self::Concrete];

    /// Parameter ordinal (0-based).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Material for a parameter ordinal.
    ///
    /// Out-of-range ordinals clamp to the last material in release builds
    /// and trip a debug assertion in debug builds.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::ALL.len(), "material ordinal {index} out of range");
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Display label, as exposed to hosts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Glass => "Glass",
            Self::Wood => "Wood",
            Self::Drywall => "Drywall",
            Self::Concrete => "Concrete",
        }
    }

    /// Parses a host-facing label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label))
    }
}

/// Number of walls between sound source and listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallCount {
    /// No walls — the cascade passes audio through untouched.
    Zero,
    /// One wall.
    One,
    /// Two walls.
    Two,
    /// Three walls.
    Three,
    /// Four walls.
    Four,
}

impl WallCount {
    /// All counts, in parameter order.
    pub const ALL: [Self; 5] = [Self::Zero, Self::One, Self::Two, Self::Three, Self::Four];

    /// Parameter ordinal (0-based).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wall count for a parameter ordinal.
    ///
    /// Out-of-range ordinals clamp to the last count in release builds
    /// and trip a debug assertion in debug builds.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::ALL.len(), "wall ordinal {index} out of range");
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Cutoff frequency in Hz for this wall count.
    pub fn cutoff_hz(self) -> f32 {
        match self {
            Self::Zero => 7500.0,
            Self::One => 3000.0,
            Self::Two => 1500.0,
            Self::Three => 750.0,
            Self::Four => 100.0,
        }
    }

    /// Whether this is the "no walls" sentinel that bypasses the whole
    /// cascade regardless of slope.
    pub fn is_sentinel(self) -> bool {
        self == Self::Zero
    }
}

/// Cascade rolloff slope in dB per octave.
///
/// Each variant maps to a fixed number of active second-order stages.
/// The labels are the original product's; 32 is kept as-is rather than
/// relabeled to the 36 a three-stage Butterworth cascade would suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slope {
    /// 12 dB/octave — one active stage.
    Db12,
    /// 24 dB/octave — two active stages.
    Db24,
    /// 32 dB/octave — three active stages.
    Db32,
    /// 48 dB/octave — four active stages.
    Db48,
}

impl Slope {
    /// All slopes, in ordinal order.
    pub const ALL: [Self; 4] = [Self::Db12, Self::Db24, Self::Db32, Self::Db48];

    /// Number of active second-order stages this slope implies.
    pub fn stages(self) -> usize {
        self as usize + 1
    }

    /// Nominal rolloff in dB per octave.
    pub fn db_per_octave(self) -> u32 {
        match self {
            Self::Db12 => 12,
            Self::Db24 => 24,
            Self::Db32 => 32,
            Self::Db48 => 48,
        }
    }

    /// Slope selected by a material's parameter ordinal.
    pub fn from_material(material: WallMaterial) -> Self {
        Self::ALL[material.index()]
    }
}

/// Resolved configuration snapshot for one reconfiguration cycle.
///
/// Created fresh from the parameter store on every block (and at stream
/// start), then used consistently for that entire block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSettings {
    /// Wall count — selects the cutoff frequency.
    pub walls: WallCount,
    /// Cascade slope — selects the active stage count.
    pub slope: Slope,
}

impl ChainSettings {
    /// Resolves a snapshot from the two raw parameters.
    pub fn resolve(material: WallMaterial, walls: WallCount) -> Self {
        Self {
            walls,
            slope: Slope::from_material(material),
        }
    }
}
