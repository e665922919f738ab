//! Render options for template-based generation in Modelsmith.
//!
//! This module provides the [`RenderOptions`] struct which carries every value
//! a template may need that is not part of the descriptor itself:
//!
//! - License header year and holder
//! - Generation timestamp for schema fragments
//! - How the dual-context initializer treats a failed fallback
//!
//! The renderer never reads the clock. Callers that want a timestamp or the
//! current year pass it in here.
//!
//! # Example
//!
//! ```rust
//! use modelsmith_core::templates::{FallbackPolicy, RenderOptions};
//!
//! let options = RenderOptions {
//!     license_year: 2025,
//!     generated_at: Some("2025-01-01T00:00:00Z".to_string()),
//!     fallback_policy: FallbackPolicy::Propagate,
//!     ..Default::default()
//! };
//! assert_eq!(options.license_holder, "Padde Software");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{error::Error, utils::normalize_key};

/// Holder named in the license header unless overridden
pub const DEFAULT_LICENSE_HOLDER: &str = "Padde Software";

/// Year used when the caller does not supply one
pub const DEFAULT_LICENSE_YEAR: i32 = 2025;

/// What the dual-context initializer does when neither context yields a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Wrap initialization in a catch-all that only logs
    #[default]
    LogOnly,
    /// No catch-all; fail initialization with an exception
    Propagate,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogOnly => "log-only",
            Self::Propagate => "propagate",
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "log-only" | "log" => Ok(Self::LogOnly),
            "propagate" | "throw" => Ok(Self::Propagate),
            _ => Err(Error::config(format!("Unknown fallback policy: {}", s))),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values injected into templates alongside the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Year printed in the license header
    pub license_year: i32,

    /// Copyright holder printed in the license header
    pub license_holder: String,

    /// Timestamp line for schema fragments; omitted when `None`
    pub generated_at: Option<String>,

    /// Failure handling for the dual-context fallback
    pub fallback_policy: FallbackPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            license_year: DEFAULT_LICENSE_YEAR,
            license_holder: DEFAULT_LICENSE_HOLDER.to_string(),
            generated_at: None,
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl RenderOptions {
    /// The license block placed above the package line
    pub fn license_header(&self) -> String {
        format!(
            "/*~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~\n \
             ~ Copyright {} {}\n \
             ~ Licensed under the MIT License\n \
             ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~*/",
            self.license_year, self.license_holder
        )
    }
}
