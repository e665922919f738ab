//! Template registry and renderer.
//!
//! Template sources are compiled into the binary and parsed once into a single
//! Tera instance. Each model template kind maps to one entry; rendering builds a
//! context from the descriptor and hands it to Tera. Nothing here touches the
//! file system or the clock.

// Internal imports (std, crate)
use std::sync::Arc;

use crate::{
    builders::ModelContext,
    error::{Error, Result},
    model::ModelDescriptor,
};

use super::{RenderOptions, TemplateKind};

// External imports (alphabetized)
use once_cell::sync::OnceCell;
use serde_json::{Map, Value as JsonValue};
use tera::{Context, Tera};

/// Name of the schema-fragment template inside the registry's engine
pub const SCHEMA_FRAGMENT_TEMPLATE: &str = "schema_fragment.graphql.tera";

const SOURCES: &[(&str, &str)] = &[
    (
        "base_entity.java.tera",
        include_str!("../../templates/base_entity.java.tera"),
    ),
    (
        "request_context_entity.java.tera",
        include_str!("../../templates/request_context_entity.java.tera"),
    ),
    (
        "exporting_entity.java.tera",
        include_str!("../../templates/exporting_entity.java.tera"),
    ),
    (
        "dual_context_entity.java.tera",
        include_str!("../../templates/dual_context_entity.java.tera"),
    ),
    (
        "helper_entity.java.tera",
        include_str!("../../templates/helper_entity.java.tera"),
    ),
    (
        "fallback_init.java.tera",
        include_str!("../../templates/fallback_init.java.tera"),
    ),
    (
        SCHEMA_FRAGMENT_TEMPLATE,
        include_str!("../../templates/schema_fragment.graphql.tera"),
    ),
];

/// Context keys every model template needs to be non-empty
const REQUIRED_MODEL_VARS: &[&str] = &["package", "type_name"];

static GLOBAL: OnceCell<TemplateRegistry> = OnceCell::new();

/// One registered model template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub kind: TemplateKind,
    /// Name of the template inside the engine
    pub template_name: &'static str,
}

impl TemplateEntry {
    pub fn key(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Loads and renders the built-in templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    /// Parsed Tera template engine instance
    tera: Arc<Tera>,
    /// Model templates in presentation order
    entries: Vec<TemplateEntry>,
}

impl TemplateRegistry {
    /// Parse every built-in template.
    ///
    /// Prefer [`TemplateRegistry::global`], which does this once per process.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_templates(SOURCES.to_vec()).map_err(|e| {
            log::error!("Failed to parse built-in templates: {}", e);
            Error::template(format!("Failed to parse templates: {}", e))
        })?;

        let entries = TemplateKind::all()
            .map(|kind| TemplateEntry {
                kind,
                template_name: template_name(kind),
            })
            .collect();

        Ok(Self {
            tera: Arc::new(tera),
            entries,
        })
    }

    /// Process-wide registry, built on first use
    pub fn global() -> Result<&'static Self> {
        GLOBAL.get_or_try_init(Self::new)
    }

    /// Registered model templates in a stable order
    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Look up a model template by key or alias
    pub fn get(&self, key: &str) -> Result<&TemplateEntry> {
        let kind: TemplateKind = key.parse()?;
        self.entries
            .iter()
            .find(|entry| entry.kind == kind)
            .ok_or_else(|| Error::UnknownTemplateKind(key.to_string()))
    }

    /// Check if a template exists in the engine
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    /// Render `descriptor` with the template registered under `key`.
    ///
    /// When `key` selects a different kind than the descriptor was built for,
    /// the descriptor is re-validated against the requested kind first.
    pub fn render(
        &self,
        key: &str,
        descriptor: &ModelDescriptor,
        options: &RenderOptions,
    ) -> Result<String> {
        let entry = self.get(key)?;
        if entry.kind == descriptor.template_kind() {
            self.render_entry(entry, descriptor, options)
        } else {
            log::debug!(
                "Re-validating {} for template kind {}",
                descriptor.type_name(),
                entry.kind
            );
            let descriptor = descriptor.with_template_kind(entry.kind)?;
            self.render_entry(entry, &descriptor, options)
        }
    }

    /// Render `descriptor` with the template of its own kind
    pub fn render_descriptor(
        &self,
        descriptor: &ModelDescriptor,
        options: &RenderOptions,
    ) -> Result<String> {
        let entry = self.get(descriptor.template_kind().as_str())?;
        self.render_entry(entry, descriptor, options)
    }

    fn render_entry(
        &self,
        entry: &TemplateEntry,
        descriptor: &ModelDescriptor,
        options: &RenderOptions,
    ) -> Result<String> {
        log::debug!(
            "Rendering {} with template {}",
            descriptor.type_name(),
            entry.template_name
        );
        let context = ModelContext::build(descriptor, options)?;
        self.render_context(entry.template_name, &context, REQUIRED_MODEL_VARS)
    }

    /// Render a named template with an already-built JSON context
    pub(crate) fn render_context(
        &self,
        template_name: &str,
        context: &JsonValue,
        required_vars: &[&str],
    ) -> Result<String> {
        let context_map = context
            .as_object()
            .ok_or_else(|| Error::template("Context must be a JSON object"))?;

        Self::validate_context(context_map, required_vars)?;

        // Build Tera Context from the context map
        let mut tera_context = Context::new();
        for (k, v) in context_map {
            tera_context.insert(k, v);
        }

        self.tera.render(template_name, &tera_context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", template_name, e);
            log::error!(
                "Available context keys: {:?}",
                context_map.keys().collect::<Vec<_>>()
            );
            Error::template(format!(
                "Failed to render template '{}': {}",
                template_name, e
            ))
        })
    }

    /// Validates that all required context variables are present and non-empty
    fn validate_context(context: &Map<String, JsonValue>, required_vars: &[&str]) -> Result<()> {
        for var in required_vars {
            let present = match context.get(*var) {
                Some(JsonValue::String(s)) => !s.trim().is_empty(),
                Some(JsonValue::Null) | None => false,
                Some(_) => true,
            };
            if !present {
                return Err(Error::missing(*var));
            }
        }
        Ok(())
    }
}

fn template_name(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::BaseEntity => "base_entity.java.tera",
        TemplateKind::RequestContextEntity => "request_context_entity.java.tera",
        TemplateKind::ExportingEntity => "exporting_entity.java.tera",
        TemplateKind::DualContextEntity => "dual_context_entity.java.tera",
        TemplateKind::HelperEntity => "helper_entity.java.tera",
    }
}

/// Render with the process-wide registry; see [`TemplateRegistry::render`]
pub fn render(key: &str, descriptor: &ModelDescriptor, options: &RenderOptions) -> Result<String> {
    TemplateRegistry::global()?.render(key, descriptor, options)
}
