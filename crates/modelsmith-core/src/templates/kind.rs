//! Template kind definitions for Modelsmith.
//!
//! This module defines the supported model template kinds and the string keys
//! they are registered under. Each kind also answers to the short alias used by
//! the interactive picker.
//!
//! # Examples
//!
//! ```
//! use modelsmith_core::templates::TemplateKind;
//! use std::str::FromStr;
//!
//! // Parse a template from a string
//! let template = TemplateKind::from_str("exporting-entity").unwrap();
//! assert_eq!(template, TemplateKind::ExportingEntity);
//! assert_eq!(template.as_str(), "exporting-entity");
//!
//! // Short aliases resolve to the same kind
//! assert_eq!("exporter".parse::<TemplateKind>().unwrap(), template);
//!
//! // The default template is BaseEntity
//! assert_eq!(TemplateKind::default(), TemplateKind::BaseEntity);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

use crate::{error::Error, utils::normalize_key};

/// Supported model template kinds (entity shapes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKind {
    /// Resource-adapted model reading component content
    #[default]
    BaseEntity,
    /// Request-adapted model with page context
    RequestContextEntity,
    /// Request-adapted model with an exporter and a serialization map
    ExportingEntity,
    /// Model adaptable from either a resource or a request
    DualContextEntity,
    /// Dual-context model with common dialog properties and child helpers
    HelperEntity,
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "base-entity" | "component" => Ok(TemplateKind::BaseEntity),
            "request-context-entity" | "request" => Ok(TemplateKind::RequestContextEntity),
            "exporting-entity" | "exporter" => Ok(TemplateKind::ExportingEntity),
            "dual-context-entity" | "resource-request" | "resource-&-request" => {
                Ok(TemplateKind::DualContextEntity)
            }
            "helper-entity" | "dialog-helper" => Ok(TemplateKind::HelperEntity),
            _ => Err(Error::UnknownTemplateKind(s.to_string())),
        }
    }
}

impl TemplateKind {
    /// Returns the registry key as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BaseEntity => "base-entity",
            Self::RequestContextEntity => "request-context-entity",
            Self::ExportingEntity => "exporting-entity",
            Self::DualContextEntity => "dual-context-entity",
            Self::HelperEntity => "helper-entity",
        }
    }

    /// Human readable name shown in pickers
    pub fn label(&self) -> &'static str {
        match self {
            Self::BaseEntity => "Component Model",
            Self::RequestContextEntity => "Request Model",
            Self::ExportingEntity => "Exporter Model",
            Self::DualContextEntity => "Resource & Request Model",
            Self::HelperEntity => "Dialog Helper Model",
        }
    }

    /// One-line description of the generated shape
    pub fn description(&self) -> &'static str {
        match self {
            Self::BaseEntity => "Basic model adapted from a resource",
            Self::RequestContextEntity => "Model adapted from a request, with page context",
            Self::ExportingEntity => "Request model with an exporter and export map",
            Self::DualContextEntity => "Adaptable from both a resource and a request",
            Self::HelperEntity => "Helper for dialog properties and child models",
        }
    }

    /// Whether the kind can bind to a resource type
    pub fn accepts_resource_type(&self) -> bool {
        matches!(
            self,
            Self::BaseEntity | Self::ExportingEntity | Self::DualContextEntity
        )
    }

    /// Names every model of this kind already uses: declared members, the
    /// `getLogger` accessor and locals of methods that read the user's fields
    pub fn builtin_members(&self) -> &'static [&'static str] {
        match self {
            Self::BaseEntity => &["LOG", "logger", "resource"],
            Self::RequestContextEntity => &[
                "LOG",
                "logger",
                "request",
                "currentPage",
                "pageManager",
                "resource",
            ],
            Self::ExportingEntity => &[
                "LOG",
                "logger",
                "request",
                "resource",
                "exportMap",
                "errorMsg",
                "mapper",
            ],
            Self::DualContextEntity => &[
                "LOG",
                "logger",
                "request",
                "resource",
                "currentPage",
                "pageManager",
            ],
            Self::HelperEntity => &[
                "LOG",
                "logger",
                "request",
                "resource",
                "modelFactory",
                "currentPage",
                "pageManager",
                "title",
                "description",
                "id",
                "tags",
                "hideInNav",
            ],
        }
    }

    /// Returns an iterator over all available template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplateKind::*;
        [
            BaseEntity,
            RequestContextEntity,
            ExportingEntity,
            DualContextEntity,
            HelperEntity,
        ]
        .iter()
        .copied()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
