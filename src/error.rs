//! Error types and handling for the Travel Buddy application

use thiserror::Error;

/// Main error type for the Travel Buddy application
#[derive(Error, Debug)]
pub enum TravelBuddyError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Generative-AI provider errors
    #[error("Provider error: {message}")]
    Provider { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// User store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TravelBuddyError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelBuddyError::Config { message } => {
                format!(
                    "{}. Please check your config file and GOOGLE_API_KEY.",
                    message.trim_end_matches('.')
                )
            }
            TravelBuddyError::Provider { .. } => {
                "Travel Buddy could not reach the AI service. Please try again later.".to_string()
            }
            TravelBuddyError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelBuddyError::Storage { message } => {
                format!("User storage is unavailable ({message}). Please check DATABASE_URL.")
            }
            TravelBuddyError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TravelBuddyError::General { message } => message.clone(),
        }
    }
}
