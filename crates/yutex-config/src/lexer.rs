//! Lexer configuration.
//!
//! This module contains the `LexerConfig` struct which controls how code
//! and HTML block bodies are handed to foreign tokenizers.

use serde::{Deserialize, Serialize};

/// Language used for `\begin{code}{}` when nothing is configured.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Lexer configuration.
///
/// Fields are optional so that an override file only replaces the values it
/// actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LexerConfig {
    /// Language for code blocks that name none.
    /// Default: "text"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Hand code and HTML bodies to foreign tokenizers.
    /// Default: true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<bool>,
}

impl LexerConfig {
    /// Language for code blocks that name none.
    pub fn default_language(&self) -> &str {
        self.default_language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_LANGUAGE)
    }

    /// Whether bodies are handed to foreign tokenizers.
    pub fn embedded(&self) -> bool {
        self.embedded.unwrap_or(true)
    }

    /// Merge another LexerConfig into this one.
    ///
    /// Only values set in `other` are copied.
    pub fn merge(&mut self, other: &LexerConfig) {
        if other.default_language.is_some() {
            self.default_language = other.default_language.clone();
        }
        if other.embedded.is_some() {
            self.embedded = other.embedded;
        }
    }
}
