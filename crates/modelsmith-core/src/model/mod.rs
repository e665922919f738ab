//! Descriptor types: what to generate, validated at construction.
pub mod descriptor;
pub mod field;
pub mod validate;

pub use descriptor::{ExportOption, ModelDescriptor, ModelDescriptorBuilder, DEFAULT_EXPORT_FORMAT};
pub use field::{BindingKind, FieldDescriptor, InjectionStrategy, FIELD_TYPES};
