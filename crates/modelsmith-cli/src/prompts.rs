//! Interactive collection of a model descriptor.
//!
//! The flow walks a fixed sequence of steps, carrying a draft [`Config`] from
//! one step to the next. A step the user leaves unanswered cancels the whole
//! flow; nothing reaches the generator until every step is done.

// External imports (alphabetized)
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use modelsmith_core::{
    config::{Config, ExportConfig, FieldConfig},
    model::{validate, BindingKind, InjectionStrategy, FIELD_TYPES},
    TemplateKind,
};

/// Validation applied to non-empty text answers
pub type Validator = fn(&str) -> modelsmith_core::Result<()>;

/// Export formats offered by the picker
const EXPORT_FORMATS: &[&str] = &["json", "xml", "html", "txt"];

const DEFAULT_EXPORTER: &str = "jackson";

/// Source of answers for the interactive flow.
///
/// `None` means the user dismissed the prompt.
pub trait Prompter {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Option<Vec<usize>>>;

    /// Free text; an empty string is a valid answer
    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Option<Validator>,
    ) -> Result<Option<String>>;
}

/// Terminal prompts
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?)
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact_opt()?)
    }

    fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Option<Validator>,
    ) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        if let Some(check) = validate {
            input = input.validate_with(move |value: &String| -> Result<(), String> {
                if value.trim().is_empty() {
                    Ok(())
                } else {
                    check(value.trim()).map_err(|e| e.to_string())
                }
            });
        }
        Ok(Some(input.interact_text()?.trim().to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Kind,
    Package,
    ClassName,
    ResourceType,
    ExportName,
    ExportFormats,
    Field,
    Done,
}

/// Ask for a complete model descriptor; `None` when the user cancels
pub fn collect_model(prompter: &mut dyn Prompter) -> Result<Option<Config>> {
    let mut draft = Config::new("", "");
    let mut kind = TemplateKind::default();
    let mut step = Step::Kind;

    while step != Step::Done {
        let next = match step {
            Step::Kind => {
                let kinds: Vec<TemplateKind> = TemplateKind::all().collect();
                let items: Vec<String> = kinds
                    .iter()
                    .map(|k| format!("{} - {}", k.label(), k.description()))
                    .collect();
                prompter
                    .select("Model type", &items, 0)?
                    .and_then(|idx| kinds.get(idx).copied())
                    .map(|selected| {
                        kind = selected;
                        draft.template = selected.as_str().to_string();
                        Step::Package
                    })
            }
            Step::Package => required(
                prompter,
                "Java package (e.g. com.example.core.models)",
                None,
                validate::module_name,
            )?
            .map(|package| {
                draft.package = package;
                Step::ClassName
            }),
            Step::ClassName => required(
                prompter,
                "Model class name (e.g. MyComponentModel)",
                None,
                validate::type_name,
            )?
            .map(|class_name| {
                draft.class_name = class_name;
                if kind.accepts_resource_type() {
                    Step::ResourceType
                } else {
                    Step::Field
                }
            }),
            Step::ResourceType => {
                let prompt = "Resource type (e.g. myproject/components/content/mycomponent)";
                let answer = if kind == TemplateKind::ExportingEntity {
                    required(prompter, prompt, None, validate::resource_type)?.map(Some)
                } else {
                    optional(prompter, prompt, None, validate::resource_type)?
                };
                answer.map(|resource_type| {
                    draft.resource_type = resource_type.filter(|s| !s.is_empty());
                    if kind == TemplateKind::ExportingEntity {
                        Step::ExportName
                    } else {
                        Step::Field
                    }
                })
            }
            Step::ExportName => required(
                prompter,
                "Exporter name (e.g. jackson, gson)",
                Some(DEFAULT_EXPORTER),
                validate::export_name,
            )?
            .map(|name| {
                draft.export = Some(ExportConfig {
                    name,
                    ..Default::default()
                });
                Step::ExportFormats
            }),
            Step::ExportFormats => {
                let items: Vec<String> = EXPORT_FORMATS.iter().map(|f| f.to_uppercase()).collect();
                let defaults: Vec<bool> = EXPORT_FORMATS.iter().map(|f| *f == "json").collect();
                prompter
                    .multi_select("Export formats", &items, &defaults)?
                    .map(|picked| {
                        if let Some(export) = draft.export.as_mut() {
                            export.formats = picked
                                .iter()
                                .filter_map(|idx| EXPORT_FORMATS.get(*idx))
                                .map(|f| f.to_string())
                                .collect();
                        }
                        Step::Field
                    })
            }
            Step::Field => {
                let name = prompter.input(
                    "Field name (leave empty to finish)",
                    None,
                    Some(validate::field_name),
                )?;
                match name {
                    None => None,
                    Some(name) if name.is_empty() => Some(Step::Done),
                    Some(name) => collect_field(prompter, name, kind)?.map(|field| {
                        draft.fields.push(field);
                        Step::Field
                    }),
                }
            }
            Step::Done => Some(Step::Done),
        };

        match next {
            Some(next) => step = next,
            None => {
                tracing::debug!(?step, "Interactive flow cancelled");
                return Ok(None);
            }
        }
    }

    Ok(Some(draft))
}

fn collect_field(
    prompter: &mut dyn Prompter,
    name: String,
    kind: TemplateKind,
) -> Result<Option<FieldConfig>> {
    let types: Vec<String> = FIELD_TYPES
        .iter()
        .map(|(ty, label)| format!("{} ({})", ty, label))
        .collect();
    let Some(field_type) = prompter
        .select("Field type", &types, 0)?
        .and_then(|idx| FIELD_TYPES.get(idx))
        .map(|(ty, _)| *ty)
    else {
        return Ok(None);
    };

    let bindings: Vec<BindingKind> = BindingKind::all().collect();
    let items: Vec<String> = bindings.iter().map(|b| b.annotation().to_string()).collect();
    let Some(binding) = prompter
        .select("Injection type", &items, 0)?
        .and_then(|idx| bindings.get(idx).copied())
    else {
        return Ok(None);
    };

    let mut field = FieldConfig::new(name, field_type, binding);

    if binding.supports_optional() {
        let choices = ["Required".to_string(), "Optional".to_string()];
        match prompter.select("Is this field optional?", &choices, 0)? {
            Some(idx) => field.optional = idx == 1,
            None => return Ok(None),
        }
    }

    if binding == BindingKind::ValueBinding {
        match prompter.input("Default value (leave empty for none)", None, None)? {
            Some(value) => field.default_value = Some(value).filter(|v| !v.is_empty()),
            None => return Ok(None),
        }
    }

    if binding.supports_named_ref() {
        match prompter.input("Named reference (leave empty for default)", None, None)? {
            Some(value) => field.named = Some(value).filter(|v| !v.is_empty()),
            None => return Ok(None),
        }
    }

    if binding == BindingKind::ChildResource {
        let strategies = [
            InjectionStrategy::Default,
            InjectionStrategy::Required,
            InjectionStrategy::Optional,
        ];
        let items: Vec<String> = strategies.iter().map(|s| s.as_str().to_string()).collect();
        match prompter.select("Injection strategy", &items, 0)? {
            Some(idx) => field.injection_strategy = strategies.get(idx).copied(),
            None => return Ok(None),
        }
    }

    if kind == TemplateKind::ExportingEntity {
        let choices = ["Include".to_string(), "Exclude".to_string()];
        match prompter.select("Include in export map?", &choices, 0)? {
            Some(idx) => field.export_excluded = idx == 1,
            None => return Ok(None),
        }
    }

    Ok(Some(field))
}

// Empty answers count as unanswered
fn required(
    prompter: &mut dyn Prompter,
    prompt: &str,
    default: Option<&str>,
    check: Validator,
) -> Result<Option<String>> {
    Ok(prompter
        .input(prompt, default, Some(check))?
        .filter(|answer| !answer.is_empty()))
}

// `Some(None)` is an answered-but-empty prompt
fn optional(
    prompter: &mut dyn Prompter,
    prompt: &str,
    default: Option<&str>,
    check: Validator,
) -> Result<Option<Option<String>>> {
    Ok(prompter
        .input(prompt, default, Some(check))?
        .map(|answer| Some(answer).filter(|a| !a.is_empty())))
}
