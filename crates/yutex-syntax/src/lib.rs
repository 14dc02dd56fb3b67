//! Yutex Syntax
//!
//! Foreign-language tokenizers for the bodies of `\begin{code}{LANG}` and
//! `\begin{html}` blocks, built on the syntect library.
//!
//! # Features
//!
//! - **Stateful tokenizing** - Parse state is kept across the lines of one
//!   block, so multi-line comments and strings come out right
//! - **Language aliases** - Map common names (py, js, rs) and the `markup`
//!   identifier to syntect syntax definitions
//! - **Scope mapping** - syntect scopes are folded onto yutex token kinds
//!
//! # Example
//!
//! ```
//! use yutex_core::TokenKind;
//! use yutex_lexer::Lexer;
//! use yutex_syntax::SyntaxRegistry;
//!
//! let registry = SyntaxRegistry::new();
//! let mut lexer = Lexer::with_registry(&registry);
//! let lines = lexer.lex_document("\\begin{code}{rust}\n// hello\n\\end{code}");
//!
//! assert_eq!(lines[1].tokens[0].kind, TokenKind::Comment);
//! ```

mod languages;
mod scopes;

pub use languages::{aliases_for, all_aliases, language_alias, LANGUAGE_ALIASES};
pub use scopes::kind_for_scopes;

use log::warn;
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use yutex_core::{Token, TokenKind};
use yutex_lexer::classify::whole_line;
use yutex_lexer::{ForeignTokenizer, LanguageRegistry};

/// Registry of syntect syntax definitions.
///
/// Hands out one [`SyntectTokenizer`] per delegated block.
pub struct SyntaxRegistry {
    /// Syntax definitions
    syntax_set: SyntaxSet,
}

impl std::fmt::Debug for SyntaxRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxRegistry")
            .field("syntaxes", &self.syntax_set.syntaxes().len())
            .finish()
    }
}

impl Default for SyntaxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxRegistry {
    /// Create a registry with syntect's default syntax definitions.
    pub fn new() -> Self {
        Self::with_syntax_set(SyntaxSet::load_defaults_newlines())
    }

    /// Create a registry over a custom syntax set.
    ///
    /// The set must be built for lines that end in `\n`.
    pub fn with_syntax_set(syntax_set: SyntaxSet) -> Self {
        Self { syntax_set }
    }

    /// Get a reference to the syntax set.
    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntax_set
    }

    /// Find the syntax definition for a language name.
    ///
    /// This first checks the alias table (markup→HTML, golang→Go, etc.)
    /// and then falls back to syntect's built-in matching.
    pub fn syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        let canonical = language_alias(language);

        if let Some(syntax) = self.syntax_set.find_syntax_by_name(canonical) {
            return Some(syntax);
        }

        // Token match handles extensions like "rs" and lowercase names
        if let Some(syntax) = self.syntax_set.find_syntax_by_token(canonical) {
            return Some(syntax);
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(canonical) {
            return Some(syntax);
        }

        self.syntax_set.find_syntax_by_token(language)
    }

    /// List available language names, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .syntax_set
            .syntaxes()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

impl LanguageRegistry for SyntaxRegistry {
    fn tokenizer<'a>(&'a self, language: &str) -> Option<Box<dyn ForeignTokenizer + 'a>> {
        let syntax = self.syntax_for_language(language)?;
        Some(Box::new(SyntectTokenizer::new(syntax, &self.syntax_set)))
    }

    fn has_language(&self, language: &str) -> bool {
        self.syntax_for_language(language).is_some()
    }
}

/// Tokenizer state for the body of one delegated block.
///
/// Keeps syntect's parse state and scope stack across lines.
pub struct SyntectTokenizer<'a> {
    syntax_set: &'a SyntaxSet,
    name: String,
    parse_state: ParseState,
    scopes: ScopeStack,
}

impl<'a> SyntectTokenizer<'a> {
    /// Start tokenizing a block of `syntax`.
    pub fn new(syntax: &SyntaxReference, syntax_set: &'a SyntaxSet) -> Self {
        Self {
            syntax_set,
            name: syntax.name.clone(),
            parse_state: ParseState::new(syntax),
            scopes: ScopeStack::new(),
        }
    }

    /// Name of the syntax this tokenizer parses.
    pub fn syntax_name(&self) -> &str {
        &self.name
    }
}

impl ForeignTokenizer for SyntectTokenizer<'_> {
    fn tokenize_line(&mut self, line: &str) -> Vec<Token> {
        // The default syntaxes expect the line terminator
        let text = format!("{}\n", line);
        let ops = match self.parse_state.parse_line(&text, self.syntax_set) {
            Ok(ops) => ops,
            Err(err) => {
                warn!("{} tokenizer failed: {}", self.name, err);
                return whole_line(TokenKind::Plain, line);
            }
        };

        let mut tokens: Vec<Token> = Vec::new();
        let mut pos = 0;
        for (offset, op) in ops {
            let offset = offset.min(line.len());
            if offset > pos {
                push_merged(&mut tokens, kind_for_scopes(&self.scopes), pos, offset);
                pos = offset;
            }
            if let Err(err) = self.scopes.apply(&op) {
                warn!("{} scope stack out of sync: {:?}", self.name, err);
            }
        }
        if pos < line.len() {
            push_merged(&mut tokens, kind_for_scopes(&self.scopes), pos, line.len());
        }
        tokens
    }
}

/// Append `start..end`, extending the last token when the kind repeats.
fn push_merged(tokens: &mut Vec<Token>, kind: TokenKind, start: usize, end: usize) {
    match tokens.last_mut() {
        Some(last) if last.kind == kind && last.end() == start => last.span.end = end,
        _ => tokens.push(Token::new(kind, start, end)),
    }
}
