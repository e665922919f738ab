//! Field renderer: maps one field descriptor to its declaration and accessors.
//!
//! Output fragments carry no indentation on their first line; continuation
//! lines are indented for a class body so templates can place a fragment
//! after a single leading indent.

use crate::{
    model::{BindingKind, FieldDescriptor},
    utils::{escape_java, upper_first},
};

/// Indentation of a class member
pub const MEMBER_INDENT: &str = "    ";

/// Annotation lines for a field, outermost first
pub fn annotations(field: &FieldDescriptor) -> Vec<String> {
    warn_ignored_attributes(field);

    let optional = || field.optional.then(|| "@Optional".to_string());
    let named = || {
        field
            .named_ref
            .as_deref()
            .map(|named| format!("@Named(\"{}\")", escape_java(named)))
    };

    let mut lines = Vec::new();
    match field.binding {
        BindingKind::ValueBinding => {
            let default = field
                .default_value
                .as_deref()
                .map(|value| format!(", defaultValue = \"{}\"", escape_java(value)))
                .unwrap_or_default();
            lines.push(format!(
                "@ValueMapValue(name = \"{}\"{})",
                field.name, default
            ));
        }
        BindingKind::Injected | BindingKind::ScriptVariable => {
            lines.push(field.binding.annotation().to_string());
            lines.extend(optional());
            lines.extend(named());
        }
        BindingKind::ServiceLookup => {
            lines.push(field.binding.annotation().to_string());
            lines.push("@Optional".to_string());
        }
        BindingKind::ChildResource => {
            lines.push(field.binding.annotation().to_string());
            lines.extend(optional());
            if let Some(strategy) = field.injection_strategy {
                lines.push(format!("@InjectionStrategy({})", strategy.as_str()));
            }
        }
        BindingKind::RequestAttribute => {
            let optional = if field.optional { ", optional = true" } else { "" };
            lines.push(format!(
                "@RequestAttribute(name = \"{}\"{})",
                field.name, optional
            ));
        }
        BindingKind::PostInit
        | BindingKind::PreDestroy
        | BindingKind::SelfBinding
        | BindingKind::Indirection => {
            lines.push(field.binding.annotation().to_string());
        }
    }
    lines
}

/// Annotation line(s) followed by the typed member line
pub fn render_declaration(field: &FieldDescriptor) -> String {
    let mut lines = annotations(field);
    lines.push(format!("private {} {};", field.field_type, field.name));
    indent_continuation(&lines)
}

/// Getter and setter pair derived from the field's name and type
pub fn render_accessors(field: &FieldDescriptor) -> String {
    let name = &field.name;
    let method = upper_first(name);
    let ty = &field.field_type;
    let i = MEMBER_INDENT;
    let lines = [
        "/**".to_string(),
        format!(" * @return the {name}"),
        " */".to_string(),
        format!("public {ty} get{method}() {{"),
        format!("{i}return {name};"),
        "}".to_string(),
        String::new(),
        "/**".to_string(),
        format!(" * @param {name} the {name} to set"),
        " */".to_string(),
        format!("public void set{method}({ty} {name}) {{"),
        format!("{i}this.{name} = {name};"),
        "}".to_string(),
    ];
    indent_continuation(&lines)
}

// Join lines, indenting every non-blank line after the first
fn indent_continuation(lines: &[String]) -> String {
    let mut out = String::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(MEMBER_INDENT);
            }
        }
        out.push_str(line);
    }
    out
}

/// Statement adding the field to the export map
pub fn render_export_entry(field: &FieldDescriptor) -> String {
    format!(
        "exportMap.put(\"{}\", {});",
        escape_java(field.export_name()),
        field.name
    )
}

/// Join member fragments with a blank line between them
pub fn join_members<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .collect::<Vec<_>>()
        .join(&format!("\n\n{}", MEMBER_INDENT))
}

fn warn_ignored_attributes(field: &FieldDescriptor) {
    if field.default_value.is_some() && field.binding != BindingKind::ValueBinding {
        log::warn!(
            "Ignoring default value on '{}': only used by {} bindings",
            field.name,
            BindingKind::ValueBinding
        );
    }
    if field.named_ref.is_some() && !field.binding.supports_named_ref() {
        log::warn!(
            "Ignoring named reference on '{}' ({} binding)",
            field.name,
            field.binding
        );
    }
    if field.injection_strategy.is_some() && field.binding != BindingKind::ChildResource {
        log::warn!(
            "Ignoring injection strategy on '{}' ({} binding)",
            field.name,
            field.binding
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InjectionStrategy;

    fn field(name: &str, ty: &str, binding: BindingKind) -> FieldDescriptor {
        FieldDescriptor::new(name, ty, binding).unwrap()
    }

    #[test]
    fn test_value_binding_declaration() {
        let plain = field("title", "String", BindingKind::ValueBinding);
        assert_eq!(
            render_declaration(&plain),
            "@ValueMapValue(name = \"title\")\n    private String title;"
        );

        let defaulted = plain.default_value("N/A");
        assert_eq!(
            render_declaration(&defaulted),
            "@ValueMapValue(name = \"title\", defaultValue = \"N/A\")\n    private String title;"
        );
    }

    #[test]
    fn test_default_value_is_escaped() {
        let f = field("quote", "String", BindingKind::ValueBinding).default_value("say \"hi\"");
        assert!(render_declaration(&f).contains(r#"defaultValue = "say \"hi\"""#));
    }

    #[test]
    fn test_injected_with_optional_and_named() {
        let f = field("service", "PageManager", BindingKind::Injected)
            .optional(true)
            .named_ref("pageManager");
        assert_eq!(
            annotations(&f),
            vec!["@Inject", "@Optional", "@Named(\"pageManager\")"]
        );
    }

    #[test]
    fn test_script_variable_named_ref_only_when_set() {
        let f = field("currentStyle", "Style", BindingKind::ScriptVariable);
        assert_eq!(annotations(&f), vec!["@ScriptVariable"]);
        let f = f.named_ref("style");
        assert_eq!(annotations(&f), vec!["@ScriptVariable", "@Named(\"style\")"]);
    }

    #[test]
    fn test_service_lookup_is_always_optional() {
        let f = field("resolver", "ResourceResolver", BindingKind::ServiceLookup);
        assert_eq!(annotations(&f), vec!["@OSGiService", "@Optional"]);
    }

    #[test]
    fn test_child_resource_with_strategy() {
        let f = field("items", "Resource", BindingKind::ChildResource)
            .optional(true)
            .injection_strategy(InjectionStrategy::Required);
        assert_eq!(
            annotations(&f),
            vec!["@ChildResource", "@Optional", "@InjectionStrategy(REQUIRED)"]
        );
    }

    #[test]
    fn test_request_attribute() {
        let f = field("mode", "String", BindingKind::RequestAttribute).optional(true);
        assert_eq!(
            annotations(&f),
            vec!["@RequestAttribute(name = \"mode\", optional = true)"]
        );
    }

    #[test]
    fn test_marker_bindings() {
        for (binding, marker) in [
            (BindingKind::PostInit, "@PostConstruct"),
            (BindingKind::PreDestroy, "@PreDestroy"),
            (BindingKind::SelfBinding, "@Self"),
            (BindingKind::Indirection, "@Via"),
        ] {
            let f = field("target", "Resource", binding).default_value("ignored");
            assert_eq!(annotations(&f), vec![marker.to_string()]);
        }
    }

    #[test]
    fn test_accessors() {
        let f = field("hideInNav", "boolean", BindingKind::ValueBinding);
        let text = render_accessors(&f);
        assert!(text.contains("public boolean getHideInNav() {\n        return hideInNav;\n    }"));
        assert!(text.contains(
            "public void setHideInNav(boolean hideInNav) {\n        this.hideInNav = hideInNav;\n    }"
        ));
        assert!(text.contains("\n\n    /**\n     * @param hideInNav the hideInNav to set"));
        assert!(!text.starts_with(' '));
    }

    #[test]
    fn test_export_entry_uses_export_key() {
        let f = field("title", "String", BindingKind::ValueBinding);
        assert_eq!(render_export_entry(&f), "exportMap.put(\"title\", title);");
        let f = f.export_key("headline");
        assert_eq!(render_export_entry(&f), "exportMap.put(\"headline\", title);");
    }

    #[test]
    fn test_join_members() {
        assert_eq!(join_members(Vec::new()), "");
        assert_eq!(
            join_members(vec!["a".to_string(), "b".to_string()]),
            "a\n\n    b"
        );
    }
}
