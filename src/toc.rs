//! Anchor generation and table-of-contents items.
//!
//! Anchors only drop `.`, `<`, `'` and `>` before lowercasing. Any other
//! character (spaces, slashes) is kept so existing links keep resolving.

use regex::Regex;
use std::sync::LazyLock;

static RE_ANCHOR_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.<'>]").unwrap());

/// Derive the in-document anchor for `Namespace` or `Namespace.Function`.
pub fn anchor(full_name: &str) -> String {
    RE_ANCHOR_STRIP.replace_all(full_name, "").to_lowercase()
}

/// Fully-qualified name of a function within a namespace.
pub fn qualified_name(namespace: &str, function: &str) -> String {
    format!("{}.{}", namespace, function)
}

/// Top-level TOC entry for a namespace.
pub fn render_namespace_item(namespace: &str) -> String {
    format!("- [{}](#{})", namespace, anchor(namespace))
}

/// Nested TOC entry linking to `namespace.function`.
pub fn render_function_item(namespace: &str, function: &str) -> String {
    format!(
        "  - [{}](#{})",
        function,
        anchor(&qualified_name(namespace, function))
    )
}
