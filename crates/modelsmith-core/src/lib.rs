//! Modelsmith Core Library
//!
//! This library renders content-model classes and GraphQL schema fragments
//! from validated descriptors, and exposes a catalog of markup snippets.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod schema;
pub mod snippets;
pub mod templates;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Error, Result},
    generate::{generate_model, generate_schema, GeneratedFile},
    model::{BindingKind, FieldDescriptor, ModelDescriptor},
    schema::{render_schema_fragment, SchemaDescriptor, SchemaField},
    templates::{render, FallbackPolicy, RenderOptions, TemplateKind, TemplateRegistry},
};
