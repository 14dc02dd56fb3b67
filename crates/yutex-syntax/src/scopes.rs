//! Mapping from syntect scopes to token kinds.

use std::sync::LazyLock;
use syntect::parsing::{Scope, ScopeStack};
use yutex_core::TokenKind;

/// Scopes that claim everything nested inside them, delimiters included.
static ENCLOSING: LazyLock<Vec<(Scope, TokenKind)>> = LazyLock::new(|| {
    table(&[("comment", TokenKind::Comment), ("string", TokenKind::String)])
});

/// Remaining scopes, most specific first. Matched against the innermost
/// scope that has an entry.
static SCOPES: LazyLock<Vec<(Scope, TokenKind)>> = LazyLock::new(|| {
    table(&[
        ("constant.numeric", TokenKind::Number),
        ("constant", TokenKind::Constant),
        ("keyword.operator", TokenKind::Operator),
        ("keyword", TokenKind::Keyword),
        ("storage.type", TokenKind::Type),
        ("storage", TokenKind::Keyword),
        ("entity.name.type", TokenKind::Type),
        ("support.type", TokenKind::Type),
        ("support.class", TokenKind::Type),
        ("entity.name.function", TokenKind::Function),
        ("support.function", TokenKind::Function),
        ("entity.name.tag", TokenKind::Tag),
        ("entity.other.attribute-name", TokenKind::Variable),
        ("variable", TokenKind::Variable),
        ("punctuation", TokenKind::Punctuation),
    ])
});

fn table(entries: &[(&str, TokenKind)]) -> Vec<(Scope, TokenKind)> {
    entries
        .iter()
        .filter_map(|(name, kind)| Scope::new(name).ok().map(|scope| (scope, *kind)))
        .collect()
}

fn lookup(table: &[(Scope, TokenKind)], scope: Scope) -> Option<TokenKind> {
    table
        .iter()
        .find(|(prefix, _)| prefix.is_prefix_of(scope))
        .map(|(_, kind)| *kind)
}

/// Token kind for text under the given scope stack.
///
/// Comments and strings win over anything nested in them; otherwise the
/// innermost mapped scope decides. Unmapped text is [`TokenKind::Plain`].
pub fn kind_for_scopes(stack: &ScopeStack) -> TokenKind {
    let scopes = stack.as_slice();
    scopes
        .iter()
        .rev()
        .find_map(|scope| lookup(&ENCLOSING, *scope))
        .or_else(|| scopes.iter().rev().find_map(|scope| lookup(&SCOPES, *scope)))
        .unwrap_or(TokenKind::Plain)
}
