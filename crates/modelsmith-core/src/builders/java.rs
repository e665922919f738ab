//! Java-specific model context builder for Modelsmith codegen.

use super::{field, ContextBuilder};
use crate::{
    model::ModelDescriptor,
    templates::{FallbackPolicy, RenderOptions, TemplateKind},
    utils::escape_java,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Indentation of statements inside the export method's try block
const EXPORT_INDENT: &str = "            ";

/// Continuation indent of exporter annotation attributes
const ANNOTATION_INDENT: &str = "          ";

// Java-specific context for codegen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaModelContext {
    /// License block including its trailing newline, or empty
    pub license: String,
    /// Package declaration value (e.g., "com.example.core.models")
    pub package: String,
    /// Class name
    pub type_name: String,
    /// Resource type bound in the model annotation
    pub resource_type: Option<String>,
    /// Whether an exporter annotation is emitted
    pub has_exporter: bool,
    /// Whether the exporter annotation carries options
    pub has_export_options: bool,
    /// Fully rendered exporter annotation, or empty
    pub exporter_annotation: String,
    /// Field declarations, joined and indented for the class body
    pub declarations: String,
    /// Getter/setter pairs, joined and indented for the class body
    pub accessors: String,
    /// `exportMap.put(..)` statements for non-excluded fields
    pub export_entries: String,
    /// Name used in initializer log lines
    pub init_label: String,
    /// Whether the fallback initializer throws instead of logging
    pub propagate_errors: bool,
    /// Field names in declaration order
    pub field_names: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct JavaModelContextBuilder;

impl ContextBuilder<ModelDescriptor> for JavaModelContextBuilder {
    fn build(&self, d: &ModelDescriptor, options: &RenderOptions) -> crate::Result<JsonValue> {
        let kind = d.template_kind();
        let has_exporter = d.export_name().is_some();

        let context = JavaModelContext {
            license: if d.include_license_header() {
                format!("{}\n", options.license_header())
            } else {
                String::new()
            },
            package: d.module_name().to_string(),
            type_name: d.type_name().to_string(),
            resource_type: d
                .bound_resource_type()
                .filter(|_| kind.accepts_resource_type())
                .map(String::from),
            has_exporter,
            has_export_options: has_exporter && !d.export_options().is_empty(),
            exporter_annotation: exporter_annotation(d).unwrap_or_default(),
            declarations: field::join_members(d.fields().iter().map(field::render_declaration)),
            accessors: field::join_members(d.fields().iter().map(field::render_accessors)),
            export_entries: d
                .fields()
                .iter()
                .filter(|f| !f.export_excluded)
                .map(field::render_export_entry)
                .collect::<Vec<_>>()
                .join(&format!("\n{}", EXPORT_INDENT)),
            init_label: match kind {
                TemplateKind::HelperEntity => format!("dialog helper {}", d.type_name()),
                _ => d.type_name().to_string(),
            },
            propagate_errors: options.fallback_policy == FallbackPolicy::Propagate,
            field_names: d.fields().iter().map(|f| f.name.clone()).collect(),
        };

        // Convert to JSON
        Ok(serde_json::to_value(&context)?)
    }
}

/// The `@Exporter(...)` annotation, when the descriptor names an exporter
fn exporter_annotation(d: &ModelDescriptor) -> Option<String> {
    let name = d.export_name()?;
    let mut parts = vec![format!("name = \"{}\"", name)];

    if !d.export_formats().is_empty() {
        let formats = d
            .export_formats()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("extensions = {{{}}}", formats));
    }

    if !d.export_options().is_empty() {
        let options = d
            .export_options()
            .iter()
            .map(|opt| {
                format!(
                    "{}    @ExporterOption(name = \"{}\", value = \"{}\")",
                    ANNOTATION_INDENT,
                    escape_java(&opt.name),
                    escape_java(&opt.value)
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");
        parts.push(format!("options = {{\n{}\n{}}}", options, ANNOTATION_INDENT));
    }

    Some(format!(
        "@Exporter({})",
        parts.join(&format!(",\n{}", ANNOTATION_INDENT))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BindingKind, ExportOption, FieldDescriptor};

    fn descriptor(kind: TemplateKind) -> ModelDescriptor {
        ModelDescriptor::builder(kind, "com.example.core.models", "Banner")
            .bound_resource_type("site/components/banner")
            .export_name("jackson")
            .export_formats(["json", "xml"])
            .field(FieldDescriptor::new("title", "String", BindingKind::ValueBinding).unwrap())
            .field(
                FieldDescriptor::new("secret", "String", BindingKind::ValueBinding)
                    .unwrap()
                    .export_excluded(true),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_context_shape() {
        let value = JavaModelContextBuilder
            .build(&descriptor(TemplateKind::ExportingEntity), &RenderOptions::default())
            .unwrap();
        assert_eq!(value["package"], "com.example.core.models");
        assert_eq!(value["type_name"], "Banner");
        assert_eq!(value["resource_type"], "site/components/banner");
        assert_eq!(value["has_exporter"], true);
        assert_eq!(value["field_names"], serde_json::json!(["title", "secret"]));
        assert_eq!(
            value["export_entries"],
            "exportMap.put(\"title\", title);"
        );
        assert!(value["license"].as_str().unwrap().contains("Copyright 2025"));
    }

    #[test]
    fn test_resource_type_dropped_for_request_kinds() {
        let d = descriptor(TemplateKind::BaseEntity)
            .with_template_kind(TemplateKind::RequestContextEntity)
            .unwrap();
        let value = JavaModelContextBuilder
            .build(&d, &RenderOptions::default())
            .unwrap();
        assert!(value["resource_type"].is_null());
    }

    #[test]
    fn test_exporter_annotation() {
        let d = descriptor(TemplateKind::BaseEntity);
        assert_eq!(
            exporter_annotation(&d).unwrap(),
            "@Exporter(name = \"jackson\",\n          extensions = {\"json\", \"xml\"})"
        );

        let d = ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .export_name("jackson")
            .export_option(ExportOption::new("MapperFeature.SORT_PROPERTIES_ALPHABETICALLY", "true"))
            .build()
            .unwrap();
        let annotation = exporter_annotation(&d).unwrap();
        assert!(annotation.starts_with("@Exporter(name = \"jackson\",\n          options = {\n"));
        assert!(annotation.contains(
            "@ExporterOption(name = \"MapperFeature.SORT_PROPERTIES_ALPHABETICALLY\", value = \"true\")"
        ));
        assert!(annotation.ends_with("\n          })"));
    }

    #[test]
    fn test_no_exporter_without_name() {
        let d = ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .build()
            .unwrap();
        assert!(exporter_annotation(&d).is_none());
    }
}
