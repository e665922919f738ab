//! Template management for Modelsmith code generation.

pub mod kind;
pub mod options;
pub mod registry;

pub use kind::TemplateKind;
pub use options::{FallbackPolicy, RenderOptions};
pub use registry::{render, TemplateEntry, TemplateRegistry};
