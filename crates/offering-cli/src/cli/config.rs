//! CLI configuration

use std::fs;
use std::path::Path;

use offering_kit::{AmountFormatter, RoundingPolicy};
use serde_derive::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["offering.yml", "offering.yaml"];

/// Configuration file structure (offering.yml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Fractional digits kept when displaying amounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_digits: Option<u8>,

    /// How mint decimals and the display cap are reconciled
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self, String> {
        serde_yml::from_str(content).map_err(|e| format!("Failed to parse YAML config: {}", e))
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::parse(&content)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Option<Self>, String> {
        for filename in DEFAULT_CONFIG_FILES.iter() {
            let path = Path::new(filename);
            if path.exists() {
                return Self::from_file(path).map(Some);
            }
        }
        Ok(None)
    }

    /// An explicit path must exist; the default locations are optional.
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        match config_path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::load_default()?.unwrap_or_default()),
        }
    }

    pub fn formatter(&self, digits_override: Option<u8>) -> AmountFormatter {
        let mut formatter = AmountFormatter::default().with_policy(self.rounding);
        if let Some(digits) = digits_override.or(self.display_digits) {
            formatter.display_digits = digits;
        }
        formatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ConfigFile::parse("display_digits: 2\nrounding: parity\n").unwrap();
        assert_eq!(config.display_digits, Some(2));
        assert_eq!(config.rounding, RoundingPolicy::Parity);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = ConfigFile::parse("{}").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.formatter(None), AmountFormatter::default());
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = ConfigFile::parse("rounding: nearest\n").unwrap_err();
        assert!(err.starts_with("Failed to parse YAML config"));
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = ConfigFile { display_digits: Some(2), rounding: RoundingPolicy::Single };
        assert_eq!(config.formatter(None).display_digits, 2);
        assert_eq!(config.formatter(Some(6)).display_digits, 6);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let err = ConfigFile::load(Some("./does-not-exist/offering.yml")).unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }
}
