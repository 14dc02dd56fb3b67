//! Yutex Lexer
//!
//! A line-oriented lexer for the yutex markup. Each line is classified from
//! the stack of block contexts left by the line before it, so a document can
//! be lexed front to back or restarted from any saved stack.
//!
//! # Overview
//!
//! - [`rules`] holds one static rule set per block kind.
//! - [`machine`] applies a rule set to a line.
//! - [`inline`] scans paragraph and blockquote lines for inline escapes.
//! - [`driver`] is the stateless per-line entry point.
//! - [`embed`] hands code and HTML bodies to foreign tokenizers.
//!
//! [`Lexer`] ties these together for whole documents.
//!
//! # Example
//!
//! ```
//! use yutex_core::TokenKind;
//! use yutex_lexer::Lexer;
//!
//! let mut lexer = Lexer::new();
//! let lines = lexer.lex_document("\\begin{math}\nx^2\n\\end{math}");
//!
//! assert_eq!(lines[1].tokens[0].kind, TokenKind::Plain);
//! assert!(lexer.stack().is_root());
//! assert!(lexer.finish().is_ok());
//! ```

pub mod classify;
pub mod driver;
pub mod embed;
pub mod inline;
pub mod machine;
pub mod rules;

pub use driver::{drive_line, drive_lines, drive_lines_from, DriveLines, LineOutput};
pub use embed::{Dispatcher, ForeignTokenizer, Handoff, LanguageRegistry, DEFAULT_LANGUAGE};
pub use inline::{find_escapes, EscapeForm, InlineEscape};
pub use machine::{transition, Transition};

use log::warn;
use yutex_core::{Result, StateStack, Token, YutexError};

/// One lexed line, with foreign tokens already filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLine {
    /// Tokens covering the line, left to right
    pub tokens: Vec<Token>,
    /// Stack at the end of the line
    pub stack: StateStack,
    /// Delegation signal of the line
    pub handoff: Option<Handoff>,
}

impl LexedLine {
    /// Whether the tokens came from a foreign tokenizer.
    pub fn is_foreign(&self) -> bool {
        matches!(self.handoff, Some(Handoff::Body { .. }))
    }
}

/// Document lexer.
///
/// Threads the state stack from line to line and routes delegated body
/// lines through a [`Dispatcher`].
#[derive(Debug, Default)]
pub struct Lexer<'r> {
    stack: StateStack,
    dispatcher: Dispatcher<'r>,
}

impl Lexer<'static> {
    /// Create a lexer without foreign tokenizers.
    ///
    /// Code and HTML bodies come out as plain text.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> Lexer<'r> {
    /// Create a lexer that tokenizes code and HTML bodies via `registry`.
    pub fn with_registry(registry: &'r dyn LanguageRegistry) -> Self {
        Self {
            stack: StateStack::new(),
            dispatcher: Dispatcher::new(Some(registry)),
        }
    }

    /// Set the language used for `\begin{code}{}`.
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.dispatcher.set_default_language(language);
        self
    }

    /// Continue from a saved stack, e.g. the one stored for the line before
    /// the first line to re-lex.
    pub fn resume(mut self, stack: StateStack) -> Self {
        self.stack = stack;
        self.dispatcher.reset();
        self
    }

    /// Current stack, i.e. the stack after the last lexed line.
    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    /// Lex the next line.
    pub fn lex_line(&mut self, line: &str) -> LexedLine {
        let Transition {
            tokens,
            stack,
            handoff,
        } = drive_line(&self.stack, line);
        let tokens = self.dispatcher.dispatch(line, tokens, handoff.as_ref());
        self.stack = stack.clone();
        LexedLine {
            tokens,
            stack,
            handoff,
        }
    }

    /// Lex every line of `text`, split as by [`str::lines`].
    pub fn lex_document(&mut self, text: &str) -> Vec<LexedLine> {
        text.lines().map(|line| self.lex_line(line)).collect()
    }

    /// Check that every block opened so far was closed.
    ///
    /// Unclosed blocks are not a lexing failure; the caller decides what to
    /// do with the error.
    pub fn finish(&self) -> Result<()> {
        if self.stack.is_root() {
            return Ok(());
        }
        let open: Vec<String> = self.stack.open_blocks().iter().map(|c| c.to_string()).collect();
        warn!("document ends inside {}", self.stack);
        Err(YutexError::Unterminated { open })
    }
}
