//! Core error types for studyplan-core.
//!
//! The scheduler itself never fails; these errors cover loading plans and
//! configuration from disk and the optional plan validation pass.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Structural problems found in a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A cycle item points at something the plan or exam catalog lacks
    #[error("Cycle '{cycle}' references unknown {kind} '{id}'")]
    UnknownReference {
        cycle: String,
        kind: &'static str,
        id: String,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_into_core_error() {
        let err: CoreError = ValidationError::DuplicateId {
            kind: "goal",
            id: "g1".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: Duplicate goal id: g1");
    }

    #[test]
    fn unknown_reference_names_the_cycle() {
        let err = ValidationError::UnknownReference {
            cycle: "c1".into(),
            kind: "exam",
            id: "x".into(),
        };
        assert_eq!(err.to_string(), "Cycle 'c1' references unknown exam 'x'");
    }

    #[test]
    fn unknown_config_key_is_reported() {
        let err: CoreError = ConfigError::UnknownKey("routine.funday".into()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key: routine.funday"
        );
    }
}
