//! Markup-template snippet catalog for editor autocompletion.
//!
//! Bodies use the editor placeholder syntax (`${1:name}`) and are returned
//! exactly as declared.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::Result;

/// One autocompletion entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub prefix: &'static str,
    pub body: &'static [&'static str],
    pub description: &'static str,
}

static SNIPPETS: &[Snippet] = &[
    Snippet {
        prefix: "data-sly-use",
        body: &["data-sly-use.${1:localVariable}=${2:model}"],
        description: "data-sly-use statement for Sling Models",
    },
    Snippet {
        prefix: "data-sly-resource",
        body: &["data-sly-resource=\"${1:./child}\""],
        description: "Include a resource",
    },
    Snippet {
        prefix: "data-sly-include",
        body: &["data-sly-include=\"${1:template.html}\""],
        description: "Include a template",
    },
    Snippet {
        prefix: "data-sly-test",
        body: &["data-sly-test=\"${1:condition}\""],
        description: "Conditional rendering",
    },
    Snippet {
        prefix: "data-sly-list",
        body: &[
            "data-sly-list=\"${1:item} in ${2:items}\"",
            "    ${3:${1}}",
            "/data-sly-list",
        ],
        description: "List iteration",
    },
    Snippet {
        prefix: "data-sly-repeat",
        body: &[
            "data-sly-repeat=\"${1:item} in ${2:items}\"",
            "    ${3:${1}}",
            "/data-sly-repeat",
        ],
        description: "Repeat content",
    },
    Snippet {
        prefix: "data-sly-text",
        body: &["data-sly-text=\"${1:expression}\""],
        description: "Output text",
    },
    Snippet {
        prefix: "data-sly-attribute",
        body: &["data-sly-attribute.${1:attribute}=\"${2:value}\""],
        description: "Set HTML attribute",
    },
    Snippet {
        prefix: "data-sly-element",
        body: &["data-sly-element=\"${1:div}\""],
        description: "Set HTML element",
    },
    Snippet {
        prefix: "data-sly-template",
        body: &[
            "<template data-sly-template.${1:name}=\"${2:params}\"",
            "          data-sly-use.template=\"${3:template}\">",
            "    ${4:<!-- Content -->}",
            "</template>",
        ],
        description: "Define a template",
    },
    Snippet {
        prefix: "data-sly-call",
        body: &["data-sly-call=\"${1:template} @ ${2:params}\""],
        description: "Call a template",
    },
    Snippet {
        prefix: "data-sly-unwrap",
        body: &["data-sly-unwrap"],
        description: "Remove wrapper element",
    },
    Snippet {
        prefix: "data-sly-include-clientlib",
        body: &[
            "<sly data-sly-include=\"/libs/wcm/foundation/components/page/customheaderlibs.html\"",
            "     data-sly-use.clientlib=\"/libs/granite/sightly/templates/clientlib.html\"",
            "     data-sly-call=\"${clientlib.all @ categories='${1:clientlib.category}'}\"",
            "     data-sly-unwrap></sly>",
        ],
        description: "Include client library",
    },
];

/// Every snippet in declaration order
pub fn all() -> &'static [Snippet] {
    SNIPPETS
}

/// Snippet registered under `prefix`
pub fn lookup(prefix: &str) -> Option<&'static Snippet> {
    SNIPPETS.iter().find(|s| s.prefix == prefix)
}

/// Completions offered for the text before the cursor.
///
/// Only lines already inside a markup directive get suggestions.
pub fn completions_for_line(line_prefix: &str) -> &'static [Snippet] {
    if line_prefix.contains("data-sly-") || line_prefix.contains("sly-") {
        SNIPPETS
    } else {
        &[]
    }
}

impl Snippet {
    /// Body joined with newlines
    pub fn text(&self) -> String {
        self.body.join("\n")
    }
}

/// Catalog in the editor snippet-file shape, keyed by prefix
pub fn to_snippet_json() -> Result<String> {
    let mut map = Map::new();
    for snippet in SNIPPETS {
        map.insert(snippet.prefix.to_string(), serde_json::to_value(snippet)?);
    }
    Ok(serde_json::to_string_pretty(&JsonValue::Object(map))?)
}
