//! Shape validation for descriptor values.
//!
//! Empty values report [`Error::MissingRequiredField`]; values that are present
//! but malformed report [`Error::InvalidIdentifier`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static MODULE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(\.[a-z][a-z0-9]*)*$").expect("module name regex should be valid")
});

static TYPE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("type name regex should be valid"));

static FIELD_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("field name regex should be valid")
});

// Qualified names with optional generics and array suffixes: `String[]`, `List<Page>`
static FIELD_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*(<[A-Za-z0-9_.,<>\[\]? ]+>)?(\[\])*$")
        .expect("field type regex should be valid")
});

// Named type or one-level list, each optionally non-null: `ID!`, `[String!]!`
static SCHEMA_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*!?|\[[A-Za-z_][A-Za-z0-9_]*!?\]!?)$")
        .expect("schema type regex should be valid")
});

static RESOURCE_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+(/[A-Za-z0-9_.\-]+)*$")
        .expect("resource type regex should be valid")
});

static EXPORT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("export name regex should be valid"));

static EXPORT_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+$").expect("export format regex should be valid"));

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Whether `name` is reserved in the generated language
pub fn is_java_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

fn check(field: &str, value: &str, pattern: &Regex) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::missing(field));
    }
    if !pattern.is_match(value) {
        return Err(Error::invalid_identifier(field, value));
    }
    Ok(())
}

/// Dotted lowercase package name, e.g. `com.example.core.models`
pub fn module_name(value: &str) -> Result<()> {
    check("module_name", value, &MODULE_NAME)?;
    if let Some(segment) = value.split('.').find(|s| is_java_keyword(s)) {
        return Err(Error::invalid_identifier("module_name", segment));
    }
    Ok(())
}

/// PascalCase type name, e.g. `Banner`
pub fn type_name(value: &str) -> Result<()> {
    check("type_name", value, &TYPE_NAME)
}

/// Member identifier, e.g. `title`
pub fn field_name(value: &str) -> Result<()> {
    check("field.name", value, &FIELD_NAME)?;
    if is_java_keyword(value) {
        return Err(Error::invalid_identifier("field.name", value));
    }
    Ok(())
}

/// Member type expression, e.g. `String[]` or `List<Page>`
pub fn field_type(value: &str) -> Result<()> {
    check("field.type", value, &FIELD_TYPE)
}

/// Schema field name; only the identifier shape applies
pub fn schema_field_name(value: &str) -> Result<()> {
    check("field.name", value, &FIELD_NAME)
}

/// Schema field type, e.g. `ID!` or `[String]`
pub fn schema_field_type(value: &str) -> Result<()> {
    check("field.type", value, &SCHEMA_TYPE)
}

/// Slash separated resource type, e.g. `myproject/components/content/banner`
pub fn resource_type(value: &str) -> Result<()> {
    check("bound_resource_type", value, &RESOURCE_TYPE)
}

/// Exporter name, letters only, e.g. `jackson`
pub fn export_name(value: &str) -> Result<()> {
    check("export_name", value, &EXPORT_NAME)
}

/// Export extension, e.g. `json`
pub fn export_format(value: &str) -> Result<()> {
    check("export_formats", value, &EXPORT_FORMAT)
}
