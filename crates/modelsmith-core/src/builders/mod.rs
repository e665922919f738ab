//! Context builders: turn descriptors into template contexts.
pub mod field;
pub mod java;

use crate::{model::ModelDescriptor, templates::RenderOptions};
use serde_json::Value as JsonValue;

/// Trait for converting a descriptor into a language-specific template context.
pub trait ContextBuilder<D: ?Sized> {
    fn build(&self, input: &D, options: &RenderOptions) -> crate::Result<JsonValue>;
}

pub struct ModelContext;

impl ModelContext {
    /// Build the template context for a model descriptor
    pub fn build(descriptor: &ModelDescriptor, options: &RenderOptions) -> crate::Result<JsonValue> {
        Self::get_builder().build(descriptor, options)
    }

    /// Every model template currently targets Java
    pub fn get_builder() -> Box<dyn ContextBuilder<ModelDescriptor>> {
        Box::new(java::JavaModelContextBuilder)
    }
}
