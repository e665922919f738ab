//! Schema fragment generator.
//!
//! Renders a GraphQL type definition plus an example query from a small
//! descriptor. When the descriptor carries no fields a canned set is used.

use std::collections::HashSet;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    error::{Error, Result},
    model::validate,
    templates::{registry::SCHEMA_FRAGMENT_TEMPLATE, RenderOptions, TemplateRegistry},
    utils::lower_first,
};

/// Type used when a field names none
pub const DEFAULT_FIELD_TYPE: &str = "String";

/// One field of the generated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub field_type: Option<String>,
    pub required: bool,
    pub description: Option<String>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            required: false,
            description: None,
        }
    }

    pub fn field_type(mut self, field_type: impl Into<String>) -> Self {
        let value = field_type.into();
        self.field_type = (!value.trim().is_empty()).then_some(value);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Line breaks are folded into single spaces
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let value = single_line(&description.into());
        self.description = (!value.is_empty()).then_some(value);
        self
    }

    /// `    name: Type[!][ # description]`
    pub fn render_line(&self) -> String {
        let ty = self.field_type.as_deref().unwrap_or(DEFAULT_FIELD_TYPE);
        let bang = if self.required && !ty.ends_with('!') {
            "!"
        } else {
            ""
        };
        let description = self
            .description
            .as_deref()
            .map(single_line)
            .filter(|d| !d.is_empty())
            .map(|d| format!(" # {}", d))
            .unwrap_or_default();
        format!("    {}: {}{}{}", self.name, ty, bang, description)
    }
}

// Keeps a description inside its `#` comment
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses `name:type[:required][:description]`.
///
/// The third segment is treated as the required flag when it reads `required`,
/// `true` or `!`; otherwise it starts the description. The description keeps
/// any further colons.
impl FromStr for SchemaField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(Error::missing("field.name"));
        }
        let mut field = SchemaField::new(name).field_type(parts.next().unwrap_or_default().trim());

        if let Some(rest) = parts.next() {
            let (flag, description) = match rest.split_once(':') {
                Some((flag, description)) => (flag.trim(), description),
                None => (rest.trim(), ""),
            };
            match flag.to_ascii_lowercase().as_str() {
                "required" | "true" | "!" => {
                    field = field.required(true).description(description.trim());
                }
                "" | "optional" | "false" => {
                    field = field.description(description.trim());
                }
                _ => field = field.description(rest.trim()),
            }
        }
        Ok(field)
    }
}

/// Input of one schema fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescriptor {
    model_name: String,
    fields: Vec<SchemaField>,
}

impl SchemaDescriptor {
    /// `model_name` must be a PascalCase identifier. Field names must be
    /// unique identifiers and field types GraphQL type references.
    pub fn new(model_name: impl Into<String>, fields: Vec<SchemaField>) -> Result<Self> {
        let model_name = model_name.into();
        validate::type_name(&model_name).map_err(|e| match e {
            Error::InvalidIdentifier { value, .. } => {
                Error::invalid_identifier("model_name", value)
            }
            Error::MissingRequiredField(_) => Error::missing("model_name"),
            other => other,
        })?;

        let mut names = HashSet::new();
        for field in &fields {
            validate::schema_field_name(&field.name)?;
            if let Some(ty) = &field.field_type {
                validate::schema_field_type(ty)?;
            }
            if !names.insert(field.name.as_str()) {
                return Err(Error::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { model_name, fields })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }
}

/// Fields used when a descriptor supplies none
pub fn default_fields() -> Vec<SchemaField> {
    vec![
        SchemaField::new("id")
            .field_type("ID!")
            .description("Unique identifier"),
        SchemaField::new("title")
            .field_type("String")
            .description("The title of the item"),
        SchemaField::new("description")
            .field_type("String")
            .description("A detailed description"),
        SchemaField::new("created")
            .field_type("String")
            .description("Creation timestamp"),
    ]
}

#[derive(Debug, Serialize)]
struct SchemaContext<'a> {
    model_name: &'a str,
    query_name: String,
    generated_at: Option<&'a str>,
    field_lines: String,
}

/// Render the schema fragment for `descriptor`
pub fn render_schema_fragment(
    descriptor: &SchemaDescriptor,
    options: &RenderOptions,
) -> Result<String> {
    let defaults;
    let fields = if descriptor.fields.is_empty() {
        log::debug!(
            "No fields for {}, using default schema fields",
            descriptor.model_name
        );
        defaults = default_fields();
        &defaults
    } else {
        &descriptor.fields
    };

    let context = SchemaContext {
        model_name: &descriptor.model_name,
        query_name: lower_first(&descriptor.model_name),
        generated_at: options.generated_at.as_deref(),
        field_lines: fields
            .iter()
            .map(SchemaField::render_line)
            .collect::<Vec<_>>()
            .join("\n"),
    };

    TemplateRegistry::global()?.render_context(
        SCHEMA_FRAGMENT_TEMPLATE,
        &serde_json::to_value(&context)?,
        &["model_name"],
    )
}
