//! Field descriptors: one generated member each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validate;
use crate::error::{Error, Result};

/// How a field's runtime value is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Direct lookup in the resource's value map
    ValueBinding,
    /// Generic dependency injection
    Injected,
    /// Service registry lookup
    ServiceLookup,
    /// Child resource lookup
    ChildResource,
    /// Request-scoped attribute
    RequestAttribute,
    /// Script-scope variable
    ScriptVariable,
    /// Lifecycle hook run after injection
    PostInit,
    /// Lifecycle hook run before disposal
    PreDestroy,
    /// The adaptable itself
    SelfBinding,
    /// Injection through another adaptable
    Indirection,
}

impl BindingKind {
    /// Canonical key used in descriptor files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValueBinding => "value",
            Self::Injected => "inject",
            Self::ServiceLookup => "service",
            Self::ChildResource => "child-resource",
            Self::RequestAttribute => "request-attribute",
            Self::ScriptVariable => "script-variable",
            Self::PostInit => "post-init",
            Self::PreDestroy => "pre-destroy",
            Self::SelfBinding => "self",
            Self::Indirection => "via",
        }
    }

    /// The marker annotation the kind renders as
    pub fn annotation(&self) -> &'static str {
        match self {
            Self::ValueBinding => "@ValueMapValue",
            Self::Injected => "@Inject",
            Self::ServiceLookup => "@OSGiService",
            Self::ChildResource => "@ChildResource",
            Self::RequestAttribute => "@RequestAttribute",
            Self::ScriptVariable => "@ScriptVariable",
            Self::PostInit => "@PostConstruct",
            Self::PreDestroy => "@PreDestroy",
            Self::SelfBinding => "@Self",
            Self::Indirection => "@Via",
        }
    }

    /// Whether the kind carries an `optional` choice
    pub fn supports_optional(&self) -> bool {
        matches!(
            self,
            Self::ValueBinding
                | Self::Injected
                | Self::ChildResource
                | Self::RequestAttribute
                | Self::ScriptVariable
        )
    }

    /// Whether the kind can embed a named reference
    pub fn supports_named_ref(&self) -> bool {
        matches!(self, Self::Injected | Self::ScriptVariable)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        use BindingKind::*;
        [
            ValueBinding,
            Injected,
            ServiceLookup,
            ChildResource,
            RequestAttribute,
            ScriptVariable,
            SelfBinding,
            PostInit,
            PreDestroy,
            Indirection,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for BindingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // Annotation-style keys (`valueMapValue`) are matched before normalizing
        let lowered = s.trim().trim_start_matches('@').to_ascii_lowercase();
        let key = lowered.replace(['_', ' '], "-");
        match key.as_str() {
            "value" | "value-binding" | "valuemapvalue" => Ok(Self::ValueBinding),
            "inject" | "injected" => Ok(Self::Injected),
            "service" | "service-lookup" | "osgiservice" => Ok(Self::ServiceLookup),
            "child-resource" | "childresource" => Ok(Self::ChildResource),
            "request-attribute" | "requestattribute" => Ok(Self::RequestAttribute),
            "script-variable" | "scriptvariable" => Ok(Self::ScriptVariable),
            "post-init" | "postconstruct" => Ok(Self::PostInit),
            "pre-destroy" | "predestroy" => Ok(Self::PreDestroy),
            "self" | "self-binding" => Ok(Self::SelfBinding),
            "via" | "indirection" => Ok(Self::Indirection),
            _ => Err(Error::UnsupportedBindingKind(s.to_string())),
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injection strategy embedded on child-resource bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InjectionStrategy {
    Default,
    Required,
    Optional,
}

impl InjectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Required => "REQUIRED",
            Self::Optional => "OPTIONAL",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Default, Self::Required, Self::Optional].iter().copied()
    }
}

impl FromStr for InjectionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEFAULT" => Ok(Self::Default),
            "REQUIRED" => Ok(Self::Required),
            "OPTIONAL" => Ok(Self::Optional),
            _ => Err(Error::config(format!("Unknown injection strategy: {}", s))),
        }
    }
}

/// Member types offered by the interactive picker: (type, label)
pub const FIELD_TYPES: &[(&str, &str)] = &[
    ("String", "STRING"),
    ("String[]", "STRING_ARRAY"),
    ("int", "INTEGER"),
    ("long", "LONG"),
    ("double", "DOUBLE"),
    ("boolean", "BOOLEAN"),
    ("Calendar", "CALENDAR"),
    ("Resource", "RESOURCE"),
    ("ResourceResolver", "RESOLVER"),
    ("Session", "SESSION"),
    ("SlingHttpServletRequest", "REQUEST"),
    ("SlingHttpServletResponse", "RESPONSE"),
    ("Component", "COMPONENT"),
    ("Page", "PAGE"),
    ("PageManager", "PAGE_MANAGER"),
    ("Design", "DESIGN"),
    ("Style", "STYLE"),
    ("Logger", "LOGGER"),
];

/// One generated member of a model type.
///
/// Built with [`FieldDescriptor::new`], which validates the name and type, then
/// refined with the builder methods. Attributes that do not apply to the
/// binding kind are kept but ignored when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: String,
    pub binding: BindingKind,
    pub optional: bool,
    pub named_ref: Option<String>,
    pub default_value: Option<String>,
    pub injection_strategy: Option<InjectionStrategy>,
    pub export_excluded: bool,
    /// Key used in the export map instead of `name`
    pub export_key: Option<String>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        binding: BindingKind,
    ) -> Result<Self> {
        let name = name.into();
        let field_type = field_type.into();
        validate::field_name(&name)?;
        validate::field_type(&field_type)?;
        Ok(Self {
            name,
            field_type,
            binding,
            optional: false,
            named_ref: None,
            default_value: None,
            injection_strategy: None,
            export_excluded: false,
            export_key: None,
        })
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Named reference; blank values clear it
    pub fn named_ref(mut self, named: impl Into<String>) -> Self {
        self.named_ref = non_blank(named.into());
        self
    }

    /// Default value; blank values clear it
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = non_blank(value.into());
        self
    }

    pub fn injection_strategy(mut self, strategy: InjectionStrategy) -> Self {
        self.injection_strategy = Some(strategy);
        self
    }

    pub fn export_excluded(mut self, excluded: bool) -> Self {
        self.export_excluded = excluded;
        self
    }

    pub fn export_key(mut self, key: impl Into<String>) -> Self {
        self.export_key = non_blank(key.into());
        self
    }

    /// The key this field is exported under
    pub fn export_name(&self) -> &str {
        self.export_key.as_deref().unwrap_or(&self.name)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
