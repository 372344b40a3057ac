//! Identifier normalization for generated Rust code.
//!
//! WebIDL member names are camelCase; generated Rust items are snake_case.
//! Conversion is character-class-driven with no lexicon awareness, so
//! consecutive capitals are split (`"URL"` becomes `"u_r_l"`).

use std::collections::HashSet;
use std::sync::LazyLock;

/// Rust keywords that cannot be used as identifiers.
pub static RUST_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "as", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false",
        "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
        "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
        "unsafe", "use", "where", "while", "async", "await", "abstract", "become", "box", "do",
        "final", "macro", "override", "priv", "try", "typeof", "union", "unsized", "virtual",
        "yield",
    ]
    .into_iter()
    .collect()
});

/// Convert an identifier to snake_case.
///
/// A separator is inserted before every uppercase letter and the result is
/// lowercased; no leading separator is produced.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Append a trailing `_` to identifiers that collide with a Rust keyword.
///
/// Not idempotent; each identifier must be escaped exactly once.
pub fn escape_reserved(s: &str) -> String {
    if RUST_RESERVED_WORDS.contains(s) {
        format!("{s}_")
    } else {
        s.to_string()
    }
}

/// snake_case conversion followed by reserved-word escaping; the standard
/// normalization applied to every generated item name.
pub fn rust_ident(s: &str) -> String {
    escape_reserved(&to_snake_case(s))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("addEventListener"), "add_event_listener");
        assert_eq!(to_snake_case("fooBarBaz"), "foo_bar_baz");
        assert_eq!(to_snake_case("foo"), "foo");
        assert_eq!(to_snake_case("URL"), "u_r_l");
        assert_eq!(to_snake_case("innerHTML"), "inner_h_t_m_l");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_escape_reserved() {
        assert_eq!(escape_reserved("type"), "type_");
        assert_eq!(escape_reserved("loop"), "loop_");
        assert_eq!(escape_reserved("href"), "href");
        assert_eq!(escape_reserved("type"), escape_reserved("type"));
        assert_ne!(escape_reserved("type"), "type");
    }

    #[test]
    fn test_rust_ident() {
        assert_eq!(rust_ident("dispatchEvent"), "dispatch_event");
        assert_eq!(rust_ident("type"), "type_");
        assert_eq!(rust_ident("defaultPrevented"), "default_prevented");
    }
}
