//! Model descriptors: the full input of one model generation request.

use std::collections::HashSet;

use super::{field::FieldDescriptor, validate};
use crate::{
    error::{Error, Result},
    templates::TemplateKind,
    utils::upper_first,
};

/// Format used when an exporting model names none
pub const DEFAULT_EXPORT_FORMAT: &str = "json";

/// Extra `name = value` pair attached to the exporter annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOption {
    pub name: String,
    pub value: String,
}

impl ExportOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Immutable description of one model type to generate.
///
/// Only constructed through [`ModelDescriptorBuilder::build`], so every
/// instance has already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    template_kind: TemplateKind,
    module_name: String,
    type_name: String,
    bound_resource_type: Option<String>,
    export_name: Option<String>,
    export_formats: Vec<String>,
    export_options: Vec<ExportOption>,
    fields: Vec<FieldDescriptor>,
    include_license_header: bool,
}

impl ModelDescriptor {
    pub fn builder(
        template_kind: TemplateKind,
        module_name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> ModelDescriptorBuilder {
        ModelDescriptorBuilder {
            template_kind,
            module_name: module_name.into(),
            type_name: type_name.into(),
            bound_resource_type: None,
            export_name: None,
            export_formats: Vec::new(),
            export_options: Vec::new(),
            fields: Vec::new(),
            include_license_header: true,
        }
    }

    pub fn template_kind(&self) -> TemplateKind {
        self.template_kind
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn bound_resource_type(&self) -> Option<&str> {
        self.bound_resource_type.as_deref()
    }

    pub fn export_name(&self) -> Option<&str> {
        self.export_name.as_deref()
    }

    pub fn export_formats(&self) -> &[String] {
        &self.export_formats
    }

    pub fn export_options(&self) -> &[ExportOption] {
        &self.export_options
    }

    /// Fields in the order they were added
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn include_license_header(&self) -> bool {
        self.include_license_header
    }

    /// Package path segments, e.g. `["com", "example", "models"]`
    pub fn module_segments(&self) -> impl Iterator<Item = &str> {
        self.module_name.split('.')
    }

    /// Copy of this descriptor rendered with another template kind
    pub fn with_template_kind(&self, template_kind: TemplateKind) -> Result<Self> {
        let mut builder = ModelDescriptorBuilder::from(self.clone());
        builder.template_kind = template_kind;
        builder.build()
    }
}

/// Incremental construction of a [`ModelDescriptor`].
#[derive(Debug, Clone)]
pub struct ModelDescriptorBuilder {
    template_kind: TemplateKind,
    module_name: String,
    type_name: String,
    bound_resource_type: Option<String>,
    export_name: Option<String>,
    export_formats: Vec<String>,
    export_options: Vec<ExportOption>,
    fields: Vec<FieldDescriptor>,
    include_license_header: bool,
}

impl From<ModelDescriptor> for ModelDescriptorBuilder {
    fn from(d: ModelDescriptor) -> Self {
        Self {
            template_kind: d.template_kind,
            module_name: d.module_name,
            type_name: d.type_name,
            bound_resource_type: d.bound_resource_type,
            export_name: d.export_name,
            export_formats: d.export_formats,
            export_options: d.export_options,
            fields: d.fields,
            include_license_header: d.include_license_header,
        }
    }
}

impl ModelDescriptorBuilder {
    pub fn bound_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        let value = resource_type.into();
        self.bound_resource_type = (!value.trim().is_empty()).then_some(value);
        self
    }

    pub fn export_name(mut self, name: impl Into<String>) -> Self {
        let value = name.into();
        self.export_name = (!value.trim().is_empty()).then_some(value);
        self
    }

    pub fn export_format(mut self, format: impl Into<String>) -> Self {
        self.export_formats.push(format.into());
        self
    }

    pub fn export_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.export_formats.extend(formats.into_iter().map(Into::into));
        self
    }

    pub fn export_option(mut self, option: ExportOption) -> Self {
        self.export_options.push(option);
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        self.fields.extend(fields);
        self
    }

    pub fn include_license_header(mut self, include: bool) -> Self {
        self.include_license_header = include;
        self
    }

    /// Validate and freeze the descriptor
    pub fn build(self) -> Result<ModelDescriptor> {
        validate::module_name(&self.module_name)?;
        validate::type_name(&self.type_name)?;

        if let Some(resource_type) = &self.bound_resource_type {
            validate::resource_type(resource_type)?;
        }
        if let Some(name) = &self.export_name {
            validate::export_name(name)?;
        }

        let mut export_formats: Vec<String> = Vec::with_capacity(self.export_formats.len());
        for format in self.export_formats {
            let format = format.trim().to_ascii_lowercase();
            validate::export_format(&format)?;
            if !export_formats.contains(&format) {
                export_formats.push(format);
            }
        }

        for option in &self.export_options {
            if option.name.trim().is_empty() {
                return Err(Error::missing("export_options.name"));
            }
        }

        if self.template_kind == TemplateKind::ExportingEntity {
            if self.bound_resource_type.is_none() {
                return Err(Error::missing("bound_resource_type"));
            }
            if self.export_name.is_none() {
                return Err(Error::missing("export_name"));
            }
            if export_formats.is_empty() {
                export_formats.push(DEFAULT_EXPORT_FORMAT.to_string());
            }
        }

        check_member_names(self.template_kind, &self.fields)?;

        Ok(ModelDescriptor {
            template_kind: self.template_kind,
            module_name: self.module_name,
            type_name: self.type_name,
            bound_resource_type: self.bound_resource_type,
            export_name: self.export_name,
            export_formats,
            export_options: self.export_options,
            fields: self.fields,
            include_license_header: self.include_license_header,
        })
    }
}

// Field names and their accessor suffixes must be unique within the type, and
// export map keys must be unique among exported fields
fn check_member_names(kind: TemplateKind, fields: &[FieldDescriptor]) -> Result<()> {
    let mut accessors: HashSet<String> = kind
        .builtin_members()
        .iter()
        .map(|name| upper_first(name))
        .collect();
    let mut export_keys: HashSet<&str> = HashSet::new();

    for field in fields {
        validate::field_name(&field.name)?;
        validate::field_type(&field.field_type)?;
        if !accessors.insert(upper_first(&field.name)) {
            return Err(Error::DuplicateField(field.name.clone()));
        }
        if kind == TemplateKind::ExportingEntity
            && !field.export_excluded
            && !export_keys.insert(field.export_name())
        {
            return Err(Error::DuplicateField(field.export_name().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BindingKind;

    fn title() -> FieldDescriptor {
        FieldDescriptor::new("title", "String", BindingKind::ValueBinding).unwrap()
    }

    #[test]
    fn test_build_preserves_field_order() {
        let names = ["zeta", "alpha", "mid"];
        let descriptor = ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .fields(names.iter().map(|n| {
                FieldDescriptor::new(*n, "String", BindingKind::ValueBinding).unwrap()
            }))
            .build()
            .unwrap();
        let got: Vec<_> = descriptor.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(got, names);
        assert!(descriptor.include_license_header());
        assert_eq!(
            descriptor.module_segments().collect::<Vec<_>>(),
            ["com", "example"]
        );
    }

    #[test]
    fn test_missing_and_invalid_names() {
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::BaseEntity, "", "Card").build(),
            Err(Error::MissingRequiredField(f)) if f == "module_name"
        ));
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "").build(),
            Err(Error::MissingRequiredField(f)) if f == "type_name"
        ));
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "card").build(),
            Err(Error::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_exporting_entity_requirements() {
        let base = || {
            ModelDescriptor::builder(TemplateKind::ExportingEntity, "com.example", "Card")
                .field(title())
        };
        assert!(matches!(
            base().export_name("jackson").build(),
            Err(Error::MissingRequiredField(f)) if f == "bound_resource_type"
        ));
        assert!(matches!(
            base().bound_resource_type("site/components/card").build(),
            Err(Error::MissingRequiredField(f)) if f == "export_name"
        ));

        let descriptor = base()
            .bound_resource_type("site/components/card")
            .export_name("jackson")
            .build()
            .unwrap();
        assert_eq!(descriptor.export_formats(), ["json"]);
    }

    #[test]
    fn test_export_formats_are_deduplicated_in_order() {
        let descriptor = ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .export_formats(["xml", "JSON", "xml", "txt"])
            .build()
            .unwrap();
        assert_eq!(descriptor.export_formats(), ["xml", "json", "txt"]);
    }

    #[test]
    fn test_duplicate_and_builtin_members_rejected() {
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
                .field(title())
                .field(title())
                .build(),
            Err(Error::DuplicateField(f)) if f == "title"
        ));
        // `title` is built into the helper template
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::HelperEntity, "com.example", "Card")
                .field(title())
                .build(),
            Err(Error::DuplicateField(_))
        ));
        // `Resource` would collide with the built-in `getResource`
        assert!(matches!(
            ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
                .field(FieldDescriptor::new("Resource", "String", BindingKind::Injected).unwrap())
                .build(),
            Err(Error::DuplicateField(_))
        ));
    }

    #[test]
    fn test_logger_and_export_locals_reserved() {
        // Every template declares `getLogger()`
        for kind in TemplateKind::all() {
            let result = ModelDescriptor::builder(kind, "com.example", "Card")
                .bound_resource_type("site/components/card")
                .export_name("jackson")
                .field(FieldDescriptor::new("logger", "Logger", BindingKind::Injected).unwrap())
                .build();
            assert!(
                matches!(&result, Err(Error::DuplicateField(f)) if f == "logger"),
                "{kind}"
            );
        }

        let exporting = |name: &str| {
            ModelDescriptor::builder(TemplateKind::ExportingEntity, "com.example", "Card")
                .bound_resource_type("site/components/card")
                .export_name("jackson")
                .field(FieldDescriptor::new(name, "String", BindingKind::ValueBinding).unwrap())
                .build()
        };
        assert!(matches!(exporting("exportMap"), Err(Error::DuplicateField(_))));
        assert!(matches!(exporting("mapper"), Err(Error::DuplicateField(_))));

        // Only the exporting template has those locals
        assert!(ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .field(FieldDescriptor::new("mapper", "String", BindingKind::ValueBinding).unwrap())
            .build()
            .is_ok());
    }

    #[test]
    fn test_duplicate_export_keys_rejected() {
        let exporting = || {
            ModelDescriptor::builder(TemplateKind::ExportingEntity, "com.example", "Card")
                .bound_resource_type("site/components/card")
                .export_name("jackson")
        };
        let keyed = |name: &str, key: &str| {
            FieldDescriptor::new(name, "String", BindingKind::ValueBinding)
                .unwrap()
                .export_key(key)
        };

        assert!(matches!(
            exporting().field(keyed("a", "k")).field(keyed("b", "k")).build(),
            Err(Error::DuplicateField(f)) if f == "k"
        ));
        // An export key may not reuse another field's name either
        assert!(matches!(
            exporting().field(title()).field(keyed("headline", "title")).build(),
            Err(Error::DuplicateField(f)) if f == "title"
        ));
        // Excluded fields never reach the map
        assert!(exporting()
            .field(keyed("a", "k"))
            .field(keyed("b", "k").export_excluded(true))
            .build()
            .is_ok());
        // Keys only matter where an export map is rendered
        assert!(ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .field(keyed("a", "k"))
            .field(keyed("b", "k"))
            .build()
            .is_ok());
    }

    #[test]
    fn test_with_template_kind_revalidates() {
        let descriptor = ModelDescriptor::builder(TemplateKind::BaseEntity, "com.example", "Card")
            .field(title())
            .build()
            .unwrap();
        let request = descriptor
            .with_template_kind(TemplateKind::RequestContextEntity)
            .unwrap();
        assert_eq!(request.template_kind(), TemplateKind::RequestContextEntity);
        assert!(descriptor
            .with_template_kind(TemplateKind::HelperEntity)
            .is_err());
    }
}
