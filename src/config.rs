//! # Rules Configuration
//!
//! Tunable constants for unit construction and per-turn budgets.

use crate::{TacticaError, TacticaResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default unit hit points
pub const DEFAULT_MAX_HP: i32 = 100;

/// Default movement budget per turn
pub const DEFAULT_MOVE_RANGE: u32 = 5;

/// Default vision radius in tiles
pub const DEFAULT_VISUAL_RANGE: u32 = 5;

/// Default number of inventory slots per unit
pub const DEFAULT_INVENTORY_SIZE: usize = 4;

/// Rule constants applied to every unit in a game.
///
/// # Examples
///
/// ```
/// use tactica::RulesConfig;
///
/// let config = RulesConfig::default();
/// assert_eq!(config.max_hp, 100);
/// assert_eq!(config.move_range, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hit points a unit starts with and can never exceed
    pub max_hp: i32,
    /// Movement cost budget a unit may spend per turn
    pub move_range: u32,
    /// Radius used for vision and for attack reach
    pub visual_range: u32,
    /// Maximum number of items a unit can carry
    pub inventory_size: usize,
}

impl RulesConfig {
    /// Creates the standard rule set.
    pub fn new() -> Self {
        Self {
            max_hp: DEFAULT_MAX_HP,
            move_range: DEFAULT_MOVE_RANGE,
            visual_range: DEFAULT_VISUAL_RANGE,
            inventory_size: DEFAULT_INVENTORY_SIZE,
        }
    }

    /// Parses a rule set from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> TacticaResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a rule set from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> TacticaResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serializes the rule set to pretty JSON.
    pub fn to_json(&self) -> TacticaResult<String> {
        serde_json::to_string_pretty(self).map_err(TacticaError::from)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> TacticaResult<()> {
        if self.max_hp <= 0 {
            return Err(TacticaError::InvalidConfig(format!(
                "max_hp must be positive, got {}",
                self.max_hp
            )));
        }
        if self.inventory_size == 0 {
            return Err(TacticaError::InvalidConfig(
                "inventory_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RulesConfig::from_json(r#"{ "move_range": 8 }"#).unwrap();
        assert_eq!(config.move_range, 8);
        assert_eq!(config.max_hp, DEFAULT_MAX_HP);
        assert_eq!(config.inventory_size, DEFAULT_INVENTORY_SIZE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            RulesConfig::from_json(r#"{ "max_hp": 0 }"#),
            Err(TacticaError::InvalidConfig(_))
        ));
        assert!(matches!(
            RulesConfig::from_json(r#"{ "inventory_size": 0 }"#),
            Err(TacticaError::InvalidConfig(_))
        ));
        assert!(matches!(
            RulesConfig::from_json("not json"),
            Err(TacticaError::Serde(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", RulesConfig::default().to_json().unwrap()).unwrap();

        let loaded = RulesConfig::load(file.path()).unwrap();
        assert_eq!(loaded, RulesConfig::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = RulesConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(TacticaError::Io(_))));
    }
}
