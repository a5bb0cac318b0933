//! Custom error types for keynudge.
//!
//! This module provides structured error types using `thiserror` for better
//! error handling and more informative error messages.

use std::io;
use thiserror::Error;

/// Main error type for keynudge operations.
#[derive(Error, Debug)]
pub enum NudgeError {
    /// Target application was not found after the specified number of attempts.
    #[error("application '{name}' not found after {attempts} attempts")]
    ProcessNotFound { name: String, attempts: u32 },

    /// Error parsing a modifier+key combo specification.
    #[error("invalid combo '{combo}': {reason}")]
    InvalidCombo { combo: String, reason: String },

    /// Error parsing a duration string.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    /// Configuration validation error.
    #[error("configuration error: {0}")]
    ConfigValidation(String),

    /// Error reading or parsing configuration file.
    #[error("failed to load config from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// Error writing configuration file.
    #[error("failed to save config to '{path}': {reason}")]
    ConfigSave { path: String, reason: String },

    /// Event injection is not supported on this platform.
    #[error("operation not supported on this platform: {0}")]
    UnsupportedPlatform(String),

    /// Error registering or handling the pause hotkey.
    #[error("hotkey error: {0}")]
    Hotkey(String),

    /// The OS refused to synthesize a keyboard event.
    #[error("failed to create keyboard event: {0}")]
    EventCreation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for keynudge operations.
pub type Result<T> = std::result::Result<T, NudgeError>;

impl NudgeError {
    /// Create a new ProcessNotFound error.
    pub fn process_not_found(name: impl Into<String>, attempts: u32) -> Self {
        Self::ProcessNotFound {
            name: name.into(),
            attempts,
        }
    }

    /// Create a new InvalidCombo error.
    pub fn invalid_combo(combo: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCombo {
            combo: combo.into(),
            reason: reason.into(),
        }
    }

    /// Create a new InvalidDuration error.
    pub fn invalid_duration(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigValidation error.
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation(message.into())
    }

    /// Create a new ConfigLoad error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigSave error.
    pub fn config_save(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigSave {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnsupportedPlatform error.
    pub fn unsupported_platform(message: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(message.into())
    }

    /// Create a new Hotkey error.
    pub fn hotkey(message: impl Into<String>) -> Self {
        Self::Hotkey(message.into())
    }

    /// Create a new EventCreation error.
    pub fn event_creation(message: impl Into<String>) -> Self {
        Self::EventCreation(message.into())
    }
}
