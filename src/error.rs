// src/error.rs

//! Unified error handling for the loader.

use std::fmt;

use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A reference could not be turned into a display name
    #[error("Resolve error for {context}: {message}")]
    Resolve { context: String, message: String },

    /// A listing page could not be fetched or decoded
    #[error("Pagination aborted at {url}: {message}")]
    Pagination { url: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a resolve error with context.
    pub fn resolve(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Resolve {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a pagination error for the page at `url`.
    pub fn pagination(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Pagination {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
