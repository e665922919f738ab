//! Descriptor files for Modelsmith model generation.
//!
//! A `Config` describes one model request on disk. The format follows the file
//! extension: `.json`, `.toml`, anything else is read as YAML.
//!
//! # Examples
//!
//! ```no_run
//! # async fn demo() -> modelsmith_core::Result<()> {
//! use modelsmith_core::config::Config;
//!
//! let config = Config::from_file("banner.yaml").await?;
//! let descriptor = config.into_descriptor()?;
//! assert_eq!(descriptor.type_name(), "Banner");
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::{
    error::{Error, Result},
    model::{BindingKind, ExportOption, FieldDescriptor, InjectionStrategy, ModelDescriptor},
    templates::TemplateKind,
};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// On-disk format of a descriptor file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// One model generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Template kind key or alias
    #[serde(default = "default_template")]
    pub template: String,

    /// Java package of the generated type
    pub package: String,

    /// Class name of the generated type
    pub class_name: String,

    /// Resource type bound by the model annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Whether the license block is emitted
    #[serde(default = "default_true")]
    pub license_header: bool,

    /// Copyright holder named in the license block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_holder: Option<String>,

    /// Exporter settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Exporter block of a descriptor file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    pub name: String,
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub options: Vec<ExportOptionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportOptionConfig {
    pub name: String,
    pub value: String,
}

/// One field of a descriptor file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Binding kind key, e.g. `value` or `child-resource`
    #[serde(default = "default_binding")]
    pub binding: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection_strategy: Option<InjectionStrategy>,
    #[serde(default)]
    pub export_excluded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_key: Option<String>,
}

impl FieldConfig {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        binding: BindingKind,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            binding: binding.as_str().to_string(),
            optional: false,
            named: None,
            default_value: None,
            injection_strategy: None,
            export_excluded: false,
            export_key: None,
        }
    }

    fn into_field(self) -> Result<FieldDescriptor> {
        let binding: BindingKind = self.binding.parse()?;
        let mut field = FieldDescriptor::new(self.name, self.field_type, binding)?
            .optional(self.optional)
            .export_excluded(self.export_excluded);
        if let Some(named) = self.named {
            field = field.named_ref(named);
        }
        if let Some(value) = self.default_value {
            field = field.default_value(value);
        }
        if let Some(strategy) = self.injection_strategy {
            field = field.injection_strategy(strategy);
        }
        if let Some(key) = self.export_key {
            field = field.export_key(key);
        }
        Ok(field)
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            template: default_template(),
            package: package.into(),
            class_name: class_name.into(),
            resource_type: None,
            export: None,
            license_header: true,
            license_holder: None,
            fields: Vec::new(),
        }
    }

    /// Load a descriptor file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        log::debug!("Loaded descriptor file {}", path.display());
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }

    /// Save the descriptor, picking the format from the extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string(self)
                .map_err(|e| Error::config(format!("Failed to encode TOML: {}", e)))?,
        };
        fs::write(path, content).await?;
        Ok(())
    }

    /// Validate the file contents into a descriptor
    pub fn into_descriptor(self) -> Result<ModelDescriptor> {
        let kind: TemplateKind = self.template.parse()?;
        let mut builder = ModelDescriptor::builder(kind, self.package, self.class_name)
            .include_license_header(self.license_header);

        if let Some(resource_type) = self.resource_type {
            builder = builder.bound_resource_type(resource_type);
        }
        if let Some(export) = self.export {
            builder = builder.export_name(export.name).export_formats(export.formats);
            for option in export.options {
                builder = builder.export_option(ExportOption::new(option.name, option.value));
            }
        }
        for field in self.fields {
            builder = builder.field(field.into_field()?);
        }
        builder.build()
    }
}

fn default_template() -> String {
    TemplateKind::default().as_str().to_string()
}

fn default_binding() -> String {
    BindingKind::ValueBinding.as_str().to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn banner() -> Config {
        let mut config = Config::new("com.example.core.models", "Banner");
        config.template = "exporter".to_string();
        config.resource_type = Some("site/components/banner".to_string());
        config.export = Some(ExportConfig {
            name: "jackson".to_string(),
            formats: vec!["json".to_string()],
            options: Vec::new(),
        });
        config.fields = vec![
            FieldConfig::new("title", "String", BindingKind::ValueBinding),
            FieldConfig {
                export_excluded: true,
                ..FieldConfig::new("items", "Resource", BindingKind::ChildResource)
            },
        ];
        config
    }

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        for file in ["banner.yaml", "banner.json", "banner.toml"] {
            let file_path = dir.path().join(file);
            let config = banner();
            config.save(&file_path).await?;

            let loaded = Config::from_file(&file_path).await?;
            assert_eq!(loaded, config, "{file}");
        }
        Ok(())
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
package: com.example
class_name: Card
fields:
  - name: title
    type: String
  - name: pageManager
    type: PageManager
    binding: inject
    optional: true
"#;
        let config = Config::parse(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.template, "base-entity");
        assert!(config.license_header);

        let descriptor = config.into_descriptor().unwrap();
        assert_eq!(descriptor.template_kind(), TemplateKind::BaseEntity);
        assert_eq!(descriptor.fields()[0].binding, BindingKind::ValueBinding);
        assert_eq!(descriptor.fields()[1].binding, BindingKind::Injected);
        assert!(descriptor.fields()[1].optional);
    }

    #[test]
    fn test_into_descriptor_errors() {
        let mut config = banner();
        config.fields[0].binding = "magic".to_string();
        assert!(matches!(
            config.into_descriptor(),
            Err(Error::UnsupportedBindingKind(b)) if b == "magic"
        ));

        let mut config = banner();
        config.template = "widget".to_string();
        assert!(matches!(
            config.into_descriptor(),
            Err(Error::UnknownTemplateKind(_))
        ));

        let mut config = banner();
        config.export = None;
        assert!(matches!(
            config.into_descriptor(),
            Err(Error::MissingRequiredField(f)) if f == "export_name"
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.JSON")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a")), ConfigFormat::Yaml);
    }
}
