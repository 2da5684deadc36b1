//! Core error types for focusgate-core.
//!
//! Every failure in the library degrades to "blocking rules may be stale
//! until the next trigger" -- nothing here is fatal to the controller.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusgate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persistent state store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Declarative rule store errors
    #[error("Rule store error: {0}")]
    RuleStore(#[from] RuleStoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the persistent state store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the state file
    #[error("Failed to load state from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the state file
    #[error("Failed to persist state to {path}: {message}")]
    PersistFailed { path: PathBuf, message: String },

    /// Home/config directory could not be resolved
    #[error("Could not resolve data directory: {0}")]
    DataDir(String),
}

/// Errors from the declarative rule store.
#[derive(Error, Debug)]
pub enum RuleStoreError {
    /// Commit of a rule set update failed
    #[error("Failed to commit rule set update: {0}")]
    CommitFailed(String),
}

/// Validation errors for user-supplied input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a plausible domain name
    #[error("Invalid domain: '{0}'")]
    InvalidDomain(String),

    /// Domain already present in the blocked list
    #[error("Site already blocked: '{0}'")]
    DuplicateSite(String),

    /// Schedule time not in zero-padded 24h HH:MM form
    #[error("Invalid schedule time '{0}': expected zero-padded 24h HH:MM")]
    InvalidTime(String),
}
