//! Language alias mapping.
//!
//! syntect already resolves syntax names and file extensions (`rust`, `py`,
//! `sh`, `cpp`, ...) on its own. The table here only covers identifiers it
//! does not know, most importantly the markup identifier used for
//! `\begin{html}` bodies.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Extra identifiers per syntect syntax name, lowercase.
const GROUPS: &[(&str, &[&str])] = &[
    ("Plain Text", &["text", "plain", "plaintext"]),
    ("HTML", &["markup", "xhtml"]),
    ("Python", &["python3", "py3"]),
    ("JavaScript", &["node"]),
    ("Bourne Again Shell (bash)", &["shell"]),
    ("C++", &["c++"]),
    ("C#", &["c#", "csharp"]),
    ("Objective-C", &["objc"]),
    ("Go", &["golang"]),
    ("Makefile", &["make"]),
];

/// Alias to syntect syntax name.
pub static LANGUAGE_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    GROUPS
        .iter()
        .flat_map(|(name, aliases)| aliases.iter().map(move |alias| (*alias, *name)))
        .collect()
});

/// Look up the canonical syntax name for a language alias.
///
/// Returns the canonical name if found, or the original input if not.
///
/// # Example
/// ```
/// use yutex_syntax::language_alias;
///
/// assert_eq!(language_alias("markup"), "HTML");
/// assert_eq!(language_alias("golang"), "Go");
/// assert_eq!(language_alias("rust"), "rust");
/// ```
pub fn language_alias(name: &str) -> &str {
    let lower = name.to_lowercase();
    LANGUAGE_ALIASES
        .get(lower.as_str())
        .copied()
        .unwrap_or(name)
}

/// Get all known language aliases as (alias, canonical_name) pairs.
pub fn all_aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    LANGUAGE_ALIASES.iter().map(|(k, v)| (*k, *v))
}

/// Get all aliases that map to a specific syntax name, sorted.
///
/// # Example
/// ```
/// use yutex_syntax::aliases_for;
///
/// let html = aliases_for("HTML");
/// assert!(html.contains(&"markup"));
/// ```
pub fn aliases_for(syntax_name: &str) -> Vec<&'static str> {
    let mut aliases: Vec<_> = LANGUAGE_ALIASES
        .iter()
        .filter(|(_, name)| **name == syntax_name)
        .map(|(alias, _)| *alias)
        .collect();
    aliases.sort_unstable();
    aliases
}
