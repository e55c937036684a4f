//! Configuration file
//!
//! Every key is optional; a missing file path means all defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reject records whose key set differs from the schema (default false)
    #[serde(default)]
    pub strict_shape: bool,

    /// Include normalized records in the report (default false)
    #[serde(default)]
    pub emit_normalized: bool,

    /// Exit non-zero when any record is invalid (default true)
    #[serde(default = "default_fail_on_invalid")]
    pub fail_on_invalid: bool,

    /// Input cap (default 1_000_000)
    #[serde(default = "default_max_records")]
    pub max_records: u64,

    /// Validation threads (default 1)
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_fail_on_invalid() -> bool {
    true
}
fn default_max_records() -> u64 {
    1_000_000
}
fn default_parallelism() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_shape: false,
            emit_normalized: false,
            fail_on_invalid: default_fail_on_invalid(),
            max_records: default_max_records(),
            parallelism: default_parallelism(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::parse(&content)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.max_records == 0 {
            return Err(CliError::config_error("max_records must be > 0"));
        }

        if self.parallelism == 0 {
            return Err(CliError::config_error("parallelism must be >= 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.strict_shape);
        assert!(!config.emit_normalized);
        assert!(config.fail_on_invalid);
        assert_eq!(config.max_records, 1_000_000);
        assert_eq!(config.parallelism, 1);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse(
            r#"{"strict_shape": true, "fail_on_invalid": false, "parallelism": 4}"#,
        )
        .unwrap();
        assert!(config.strict_shape);
        assert!(!config.fail_on_invalid);
        assert_eq!(config.parallelism, 4);
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(Config::parse(r#"{"max_records": 0}"#).is_err());
        assert!(Config::parse(r#"{"parallelism": 0}"#).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::parse(r#"{"strict": true}"#).unwrap_err();
        assert_eq!(err.code_str(), "ADROW_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"emit_normalized": true}"#).unwrap();
        let config = Config::load_or_default(Some(file.path())).unwrap();
        assert!(config.emit_normalized);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/adrow.json")).unwrap_err();
        assert_eq!(err.code_str(), "ADROW_CLI_CONFIG_ERROR");
    }
}
