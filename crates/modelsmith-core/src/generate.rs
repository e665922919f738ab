//! Code generation entry points for Modelsmith.
//!
//! These pair rendered text with the relative path it is usually written to.
//! Writing is left to the caller.

use std::path::PathBuf;

use crate::{
    error::Result,
    model::ModelDescriptor,
    schema::{render_schema_fragment, SchemaDescriptor},
    templates::{RenderOptions, TemplateRegistry},
};

/// Rendered text plus its suggested location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub relative_path: PathBuf,
    pub contents: String,
}

/// Render a model class; the path follows the package, e.g. `com/example/Banner.java`
pub fn generate_model(descriptor: &ModelDescriptor, options: &RenderOptions) -> Result<GeneratedFile> {
    // 1. Render with the template of the descriptor's own kind
    let contents = TemplateRegistry::global()?.render_descriptor(descriptor, options)?;

    // 2. Derive the path from the package segments
    let mut relative_path: PathBuf = descriptor.module_segments().collect();
    relative_path.push(format!("{}.java", descriptor.type_name()));

    Ok(GeneratedFile {
        relative_path,
        contents,
    })
}

/// Render a schema fragment to `<ModelName>.graphql`
pub fn generate_schema(descriptor: &SchemaDescriptor, options: &RenderOptions) -> Result<GeneratedFile> {
    let contents = render_schema_fragment(descriptor, options)?;
    Ok(GeneratedFile {
        relative_path: PathBuf::from(format!("{}.graphql", descriptor.model_name())),
        contents,
    })
}
