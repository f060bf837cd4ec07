//! CLI configuration read from environment variables.

use catan_board::{PresetId, DEFAULT_HEX_SIZE};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from malformed configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

/// What board to generate and how to print it
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Preset ID; unknown IDs fall back to classic-balanced
    pub preset: String,
    pub seed: Option<String>,
    pub hex_size: f64,
    pub ports: bool,
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            preset: PresetId::default().as_str().to_string(),
            seed: None,
            hex_size: DEFAULT_HEX_SIZE,
            ports: true,
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Read `BOARD_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(preset) = vars.get("BOARD_PRESET") {
            config.preset = preset.trim().to_string();
        }
        config.seed = vars
            .get("BOARD_SEED")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(value) = vars.get("BOARD_HEX_SIZE") {
            config.hex_size = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|size| size.is_finite() && *size > 0.0)
                .ok_or_else(|| ConfigError::InvalidNumber {
                    var: "BOARD_HEX_SIZE",
                    value: value.clone(),
                })?;
        }
        if let Some(value) = vars.get("BOARD_PORTS") {
            config.ports = parse_flag("BOARD_PORTS", value)?;
        }
        if let Some(value) = vars.get("BOARD_PRETTY") {
            config.pretty = parse_flag("BOARD_PRETTY", value)?;
        }

        Ok(config)
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.preset, "classic-balanced");
        assert_eq!(config.hex_size, 100.0);
    }

    #[test]
    fn test_reads_all_vars() {
        let config = CliConfig::from_vars(vars(&[
            ("BOARD_PRESET", "random-balanced"),
            ("BOARD_SEED", " lobby-7 "),
            ("BOARD_HEX_SIZE", "64"),
            ("BOARD_PORTS", "off"),
            ("BOARD_PRETTY", "false"),
        ]))
        .unwrap();

        assert_eq!(config.preset, "random-balanced");
        assert_eq!(config.seed.as_deref(), Some("lobby-7"));
        assert_eq!(config.hex_size, 64.0);
        assert!(!config.ports);
        assert!(!config.pretty);
    }

    #[test]
    fn test_blank_seed_is_none() {
        let config = CliConfig::from_vars(vars(&[("BOARD_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CliConfig::from_vars(vars(&[("BOARD_HEX_SIZE", "-3")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            CliConfig::from_vars(vars(&[("BOARD_HEX_SIZE", "big")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            CliConfig::from_vars(vars(&[("BOARD_PORTS", "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }
}
