//! Errors raised at the interface boundary
//!
//! The stepping loop itself never fails; everything here is about rejecting
//! malformed bodies, launch values or tuning files before a battle starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("body name must not be empty")]
    EmptyName,

    #[error("body '{name}' power {power} outside 1..=10")]
    PowerOutOfRange { name: String, power: u8 },

    #[error("body '{name}' power bonus {bonus} outside 0..=3")]
    PowerBonusOutOfRange { name: String, bonus: u8 },

    #[error("special ability '{ability}' threshold {threshold} outside 0..=10")]
    ThresholdOutOfRange { ability: String, threshold: f32 },

    #[error("launch power {0} outside 0..=10")]
    LaunchPowerOutOfRange(f32),

    #[error("both bodies are named '{0}'")]
    DuplicateName(String),

    #[error("invalid body definition: {0}")]
    InvalidDefinition(#[source] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(#[source] serde_json::Error),
}
