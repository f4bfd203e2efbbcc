//! Run configuration for the CLI.
//!
//! Values are resolved with the following precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (with NONET_ prefix)
//! 3. Configuration file (YAML)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use nonet_qec::{PAYLOAD_NAMES, payload_by_name};

/// Largest register the statevector simulator accepts.
const SIMULATOR_QUBIT_LIMIT: u32 = 30;

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Number of shots
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// RNG seed for the simulator; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Payload applied to the encoded register: "hadamard" or "identity"
    #[serde(default = "default_payload")]
    pub payload: String,

    /// Qubit cap of the simulator backend
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Log level when no -v flag is given: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_shots() -> u32 {
    1024
}

fn default_payload() -> String {
    "hadamard".to_string()
}

fn default_max_qubits() -> u32 {
    20
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            shots: default_shots(),
            seed: None,
            payload: default_payload(),
            max_qubits: default_max_qubits(),
            log_level: default_log_level(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file means "all defaults".
        if contents.trim().is_empty() {
            return Ok(RunConfig::default());
        }
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    ///
    /// The result is not validated; callers apply their own overrides and
    /// then call [`RunConfig::validate`].
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => RunConfig::default(),
        };
        config.merge_env(|key| std::env::var(key).ok())
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set override the current values. A set but
    /// unparsable variable is an error.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = lookup("NONET_SHOTS") {
            self.shots = parse_env("NONET_SHOTS", &v)?;
        }
        if let Some(v) = lookup("NONET_SEED") {
            self.seed = Some(parse_env("NONET_SEED", &v)?);
        }
        if let Some(v) = lookup("NONET_PAYLOAD") {
            self.payload = v;
        }
        if let Some(v) = lookup("NONET_MAX_QUBITS") {
            self.max_qubits = parse_env("NONET_MAX_QUBITS", &v)?;
        }
        if let Some(v) = lookup("NONET_LOG_LEVEL") {
            self.log_level = v;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        if payload_by_name(&self.payload).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "Unknown payload: '{}'. Available: {}",
                self.payload,
                PAYLOAD_NAMES.join(", ")
            )));
        }

        if self.max_qubits == 0 || self.max_qubits > SIMULATOR_QUBIT_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be between 1 and {SIMULATOR_QUBIT_LIMIT}, got {}",
                self.max_qubits
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ParseError(format!("{key}: cannot parse '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.payload, "hadamard");
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let config = RunConfig::from_yaml("shots: 64\nseed: 9\n").unwrap();
        assert_eq!(config.shots, 64);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.payload, "hadamard");
    }

    #[test]
    fn test_yaml_empty_is_default() {
        assert_eq!(RunConfig::from_yaml("").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        assert!(matches!(
            RunConfig::from_yaml("shotz: 5\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = RunConfig::from_yaml("shots: 64\npayload: identity\n")
            .unwrap()
            .merge_env(env(&[("NONET_SHOTS", "128"), ("NONET_SEED", "3")]))
            .unwrap();
        assert_eq!(config.shots, 128);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.payload, "identity");
    }

    #[test]
    fn test_env_absent_leaves_values() {
        let config = RunConfig::default().merge_env(env(&[])).unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_env_unparsable() {
        let result = RunConfig::default().merge_env(env(&[("NONET_SHOTS", "many")]));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_defers_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonet.yaml");
        std::fs::write(&path, "shots: 0\npayload: bogus\n").unwrap();

        let mut config = RunConfig::load(Some(&path)).unwrap();
        assert!(config.validate().is_err());

        config.shots = 16;
        config.payload = "identity".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_shots() {
        let config = RunConfig {
            shots: 0,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_unknown_payload() {
        let config = RunConfig {
            payload: "qft".to_string(),
            ..RunConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hadamard, identity"));
    }

    #[test]
    fn test_validate_log_level_and_qubits() {
        let mut config = RunConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = RunConfig::default();
        config.max_qubits = 31;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nonet.yaml");
        std::fs::write(&path, "shots: 10\nlog_level: debug\n").unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.shots, 10);
        assert_eq!(config.log_level, "debug");

        assert!(matches!(
            RunConfig::from_file(dir.path().join("missing.yaml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
