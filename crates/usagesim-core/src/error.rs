//! Core error types for usagesim-core.
//!
//! The generation routines favor permissive, best-effort behavior; errors are
//! reserved for genuinely invalid parameters, configuration problems, opt-in
//! strict checks, and cooperative cancellation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for usagesim-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A caller-supplied parameter is out of its documented range.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    /// Strict allocation was asked for more minutes than the hour window can hold.
    #[error("Infeasible allocation: {requested} minutes requested, window holds at most {capacity}")]
    InfeasibleAllocation { requested: u32, capacity: u32 },

    /// A job handle requested a stop between units of work.
    #[error("Job was cancelled")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::InvalidParameter`] with owned strings.
    pub fn invalid_parameter(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path:?}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path:?}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
