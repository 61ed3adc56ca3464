//! Parameter persistence.
//!
//! The processor's whole persistent state is the two parameter ordinals.
//! They serialize to a small JSON object keyed by the parameters' stable
//! string IDs; loading validates both ordinals before touching the store,
//! so a malformed payload leaves the parameters unchanged.

use crate::shared::{MATERIAL_PARAM, WALLS_PARAM, WallParams};
use serde::{Deserialize, Serialize};

/// Errors from state save/load.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The payload was not valid JSON for the state schema.
    #[error("state payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored ordinal is outside its parameter's choice range.
    #[error("stored {param} ordinal {value} out of range")]
    OrdinalOutOfRange {
        /// The parameter's stable string ID.
        param: &'static str,
        /// The rejected ordinal.
        value: u32,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedParams {
    wall_material: u32,
    wall_count: u32,
}

/// Serializes the two parameter ordinals to JSON.
pub fn save_state(params: &WallParams) -> Result<Vec<u8>, StateError> {
    let state = PersistedParams {
        wall_material: params.material_index(),
        wall_count: params.walls_index(),
    };
    Ok(serde_json::to_vec(&state)?)
}

/// Restores the two parameter ordinals from a JSON payload.
///
/// Both ordinals are validated before either is applied.
pub fn load_state(params: &WallParams, bytes: &[u8]) -> Result<(), StateError> {
    let state: PersistedParams = serde_json::from_slice(bytes)?;

    if state.wall_material >= MATERIAL_PARAM.count() {
        return Err(StateError::OrdinalOutOfRange {
            param: MATERIAL_PARAM.string_id,
            value: state.wall_material,
        });
    }
    if state.wall_count >= WALLS_PARAM.count() {
        return Err(StateError::OrdinalOutOfRange {
            param: WALLS_PARAM.string_id,
            value: state.wall_count,
        });
    }

    params.set_material_index(state.wall_material);
    params.set_walls_index(state.wall_count);
    tracing::debug!(
        material = state.wall_material,
        walls = state.wall_count,
        "restored parameter state"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use muros_core::{WallCount, WallMaterial};

    #[test]
    fn state_round_trips() {
        let params = WallParams::new();
        params.set_material(WallMaterial::Drywall);
        params.set_walls(WallCount::Four);

        let bytes = save_state(&params).unwrap();

        let restored = WallParams::new();
        load_state(&restored, &bytes).unwrap();
        assert_eq!(restored.material(), WallMaterial::Drywall);
        assert_eq!(restored.walls(), WallCount::Four);
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let params = WallParams::new();
        params.set_walls(WallCount::Two);

        assert!(load_state(&params, b"not json").is_err());
        assert!(load_state(&params, b"{\"wall_material\": 1}").is_err());

        // Store untouched after a failed load.
        assert_eq!(params.walls(), WallCount::Two);
        assert_eq!(params.material(), WallMaterial::Glass);
    }

    #[test]
    fn out_of_range_ordinals_are_rejected_atomically() {
        let params = WallParams::new();

        let err = load_state(
            &params,
            b"{\"wall_material\": 2, \"wall_count\": 9}",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StateError::OrdinalOutOfRange { param: "wall_count", value: 9 }
        ));

        // The in-range material must not have been applied either.
        assert_eq!(params.material(), WallMaterial::Glass);
    }

    #[test]
    fn saved_payload_uses_stable_string_ids() {
        let params = WallParams::new();
        let bytes = save_state(&params).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("wall_material"));
        assert!(text.contains("wall_count"));
    }
}
