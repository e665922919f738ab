//! Error handling for the Modelsmith generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every renderer operation reports
//! failure through this type; nothing escapes as a panic.
//!
//! # Examples
//!
//! ```
//! use modelsmith_core::error::{Error, Result};
//!
//! fn lookup(kind: &str) -> Result<()> {
//!     Err(Error::UnknownTemplateKind(kind.to_string()))
//! }
//!
//! assert!(matches!(lookup("nope"), Err(Error::UnknownTemplateKind(_))));
//! ```

use thiserror::Error;

/// Result type for Modelsmith generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Modelsmith generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// No template is registered under the requested key
    #[error("Unknown template kind: {0}")]
    UnknownTemplateKind(String),

    /// A field the template needs is empty or absent
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Binding kind string that maps to no known binding
    #[error("Unsupported binding kind: {0}")]
    UnsupportedBindingKind(String),

    /// Name or type failing shape validation
    #[error("Invalid identifier for {field}: '{value}'")]
    InvalidIdentifier { field: String, value: String },

    /// Two members of the generated type would share a name
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new missing-field error
    pub fn missing<S: Into<String>>(field: S) -> Self {
        Self::MissingRequiredField(field.into())
    }

    /// Create a new invalid-identifier error
    pub fn invalid_identifier<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::InvalidIdentifier {
            field: field.into(),
            value: value.into(),
        }
    }
}
