//! Core error types for mindfulness-core.
//!
//! Activity validation and sampler construction surface through [`CoreError`].
//! Log writes have their own [`LogWriteError`], which activity code never sees:
//! the sink swallows it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mindfulness-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Activity duration was zero or negative.
    #[error("Invalid duration: {seconds} seconds (must be a positive number of seconds)")]
    InvalidDuration { seconds: i64 },

    /// A sampler was constructed without any items.
    #[error("Cannot build a shuffle bag from an empty item pool")]
    EmptyItemPool,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A prompt file could not be read
    #[error("Failed to read prompt file {path}: {source}")]
    PromptFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// A completion record could not be appended to the activity log.
///
/// Only returned by [`FileLogSink::try_append`](crate::FileLogSink::try_append).
#[derive(Error, Debug)]
#[error("Failed to append to activity log {path}: {source}")]
pub struct LogWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
