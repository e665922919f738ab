//! String transformation utilities for code generation

/// Upper-case the first character, leaving the rest untouched (`title` -> `Title`)
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-case the first character, leaving the rest untouched (`GetProduct` -> `getProduct`)
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Escape a value for use inside a double-quoted Java string literal
pub fn escape_java(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Normalize a lookup key: lowercase, with `_` and spaces folded into `-`
pub fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("title"), "Title");
        assert_eq!(upper_first("hideInNav"), "HideInNav");
        assert_eq!(upper_first("X"), "X");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("GetProduct"), "getProduct");
        assert_eq!(lower_first("URLQuery"), "uRLQuery");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_escape_java() {
        assert_eq!(escape_java("N/A"), "N/A");
        assert_eq!(escape_java(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_java(r"C:\temp"), r"C:\\temp");
        assert_eq!(escape_java("a\nb"), "a\\nb");
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Base_Entity"), "base-entity");
        assert_eq!(normalize_key("Resource & Request"), "resource-&-request");
        assert_eq!(normalize_key("  dialog helper "), "dialog-helper");
    }
}
