//! Progression constants

use super::ConfigError;
use crate::attribute::DEFAULT_ATTRIBUTE_VALUE;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable progression constants
///
/// Built once at startup and handed to the facade; nothing reads these
/// through a global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Value every attribute starts at and resets to
    ///
    /// Only the point ledger follows this value. Attribute effect formulas
    /// are measured from the fixed default of 10.
    #[serde(default = "default_attribute_baseline")]
    pub attribute_baseline: u32,
    /// Unspent attribute points granted on class selection
    #[serde(default = "default_starting_points")]
    pub starting_attribute_points: u32,
    /// Attribute points granted per level up
    #[serde(default = "default_points_per_level")]
    pub attribute_points_per_level: u32,
    /// Highest level a character can reach
    #[serde(default = "default_max_level")]
    pub max_character_level: u32,
}

fn default_attribute_baseline() -> u32 {
    DEFAULT_ATTRIBUTE_VALUE
}
fn default_starting_points() -> u32 {
    5
}
fn default_points_per_level() -> u32 {
    5
}
fn default_max_level() -> u32 {
    100
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            attribute_baseline: default_attribute_baseline(),
            starting_attribute_points: default_starting_points(),
            attribute_points_per_level: default_points_per_level(),
            max_character_level: default_max_level(),
        }
    }
}

impl ProgressionConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: ProgressionConstants = super::load_toml(path)?;
        constants.validate().map_err(|e| e.at_path(path))?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let constants: ProgressionConstants = super::parse_toml(toml)?;
        constants.validate()?;
        Ok(constants)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_character_level == 0 {
            return Err(ConfigError::validation("max_character_level must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = ProgressionConstants::default();
        assert_eq!(constants.attribute_baseline, 10);
        assert_eq!(constants.starting_attribute_points, 5);
        assert_eq!(constants.attribute_points_per_level, 5);
        assert_eq!(constants.max_character_level, 100);
    }

    #[test]
    fn test_parse_partial_constants() {
        let constants = ProgressionConstants::parse("attribute_points_per_level = 3\n").unwrap();
        assert_eq!(constants.attribute_points_per_level, 3);
        assert_eq!(constants.starting_attribute_points, 5);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(ProgressionConstants::parse("").unwrap(), ProgressionConstants::default());
    }

    #[test]
    fn test_zero_max_level_rejected() {
        assert!(matches!(
            ProgressionConstants::parse("max_character_level = 0"),
            Err(ConfigError::Validation { .. })
        ));
    }
}
