//! Error types for the fabric list-defaults normalizer.

use std::path::PathBuf;
use thiserror::Error;

/// Tree traversal errors. Only produced in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Rule table construction and loading errors
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("Invalid rule path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Group rule at `{0}` declares no keys")]
    EmptyGroup(String),

    #[error("Group rule at `{parent}` declares key `{key}` more than once")]
    DuplicateGroupKey { parent: String, key: String },

    #[error("Rule `{rule}` depends on `{container}`, which is only created by later rule `{provider}`")]
    OutOfOrder {
        rule: String,
        container: String,
        provider: String,
    },

    #[error("Unsupported rule file format: {0:?} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to parse rule file: {0}")]
    Parse(String),

    #[error("Failed to write rule file: {0}")]
    Serialize(String),

    #[error("Rule file I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Application-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Tree error: {0}")]
    TreeError(#[from] TreeError),

    #[error("Rule table error: {0}")]
    RuleTableError(#[from] RuleTableError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid model document: {0}")]
    InvalidDocument(String),

    #[error("JSON pointer `{0}` does not resolve to a value in the model document")]
    PointerNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidDocument(err.to_string())
    }
}
