//! Battle configuration constants and tunable parameters.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runtime-tunable battle settings, loadable from RON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BattleConfig {
    /// Hard stop for automated battles that never reach a winner.
    pub max_turns: u32,
    /// Seed for the battle RNG. `None` draws from the OS.
    pub rng_seed: Option<u64>,
    /// Print the formatted event log once the battle finishes.
    pub log_events: bool,
}

impl BattleConfig {
    // ===== compile-time constants =====
    pub const MAX_STAT_STAGE: i8 = 6;
    pub const MIN_STAT_STAGE: i8 = -6;
    pub const MAX_STOCKPILE_STACKS: u8 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 100;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            rng_seed: None,
            log_events: true,
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_ron_str(&text)?)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = BattleConfig::from_ron_str("(rng_seed: Some(7))").expect("valid config");
        assert_eq!(
            config,
            BattleConfig {
                max_turns: BattleConfig::DEFAULT_MAX_TURNS,
                rng_seed: Some(7),
                log_events: true,
            }
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(BattleConfig::from_ron_str("(max_turn: 3)").is_err());
    }

    #[test]
    fn test_stage_bounds_are_symmetric() {
        assert_eq!(BattleConfig::MAX_STAT_STAGE, -BattleConfig::MIN_STAT_STAGE);
    }
}
