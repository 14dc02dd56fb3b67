//! Embedded language dispatch.
//!
//! Code and HTML block bodies belong to a foreign tokenizer. The state
//! machine only signals where such a body starts, continues and ends
//! ([`Handoff`]); the [`Dispatcher`] turns those signals into calls on a
//! tokenizer obtained from a [`LanguageRegistry`].

use crate::classify::{fill_gaps, whole_line};
use log::{debug, trace, warn};
use yutex_core::{Token, TokenKind};

/// Language used for `\begin{code}{}` when no default is configured.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Delegation signal attached to a line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Handoff {
    /// Opening line of a delegated block; the line itself is host markup
    Enter { language: String },
    /// Body line owned by the foreign tokenizer; the host emits no tokens
    Body { language: String },
    /// Closing line of a delegated block; control returns to the host
    Exit { language: String },
}

impl Handoff {
    /// Language identifier carried by the signal.
    pub fn language(&self) -> &str {
        match self {
            Handoff::Enter { language } | Handoff::Body { language } | Handoff::Exit { language } => {
                language
            }
        }
    }
}

/// Tokenizer for one foreign language.
///
/// Instances are stateful: one instance sees the body lines of one block in
/// order and carries whatever it needs from line to line.
pub trait ForeignTokenizer {
    /// Classify one body line. Spans are byte offsets into `line`.
    fn tokenize_line(&mut self, line: &str) -> Vec<Token>;
}

/// Source of foreign tokenizers, keyed by language identifier.
pub trait LanguageRegistry {
    /// A fresh tokenizer for `language`, or `None` if it is unknown.
    fn tokenizer<'a>(&'a self, language: &str) -> Option<Box<dyn ForeignTokenizer + 'a>>;

    /// Whether `language` is known.
    fn has_language(&self, language: &str) -> bool {
        self.tokenizer(language).is_some()
    }
}

struct Session<'r> {
    language: String,
    tokenizer: Option<Box<dyn ForeignTokenizer + 'r>>,
}

/// Routes delegated body lines to foreign tokenizers.
///
/// Holds at most one open session. A session opens on [`Handoff::Enter`]
/// (or on the first [`Handoff::Body`] when lexing resumes inside a block)
/// and closes on [`Handoff::Exit`]. Without a registry, or for an unknown
/// language, body lines come out as a single plain token.
pub struct Dispatcher<'r> {
    registry: Option<&'r dyn LanguageRegistry>,
    default_language: String,
    session: Option<Session<'r>>,
}

impl Default for Dispatcher<'_> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("has_registry", &self.registry.is_some())
            .field("default_language", &self.default_language)
            .field("session", &self.session_language())
            .finish()
    }
}

impl<'r> Dispatcher<'r> {
    /// Create a dispatcher over an optional registry.
    pub fn new(registry: Option<&'r dyn LanguageRegistry>) -> Self {
        Self {
            registry,
            default_language: DEFAULT_LANGUAGE.to_string(),
            session: None,
        }
    }

    /// Set the language used for an empty code language.
    pub fn set_default_language(&mut self, language: impl Into<String>) {
        self.default_language = language.into();
    }

    /// Language an identifier from the markup resolves to.
    pub fn resolve<'a>(&'a self, language: &'a str) -> &'a str {
        let language = language.trim();
        if language.is_empty() {
            &self.default_language
        } else {
            language
        }
    }

    /// Language of the open session, if any.
    pub fn session_language(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.language.as_str())
    }

    /// Drop the open session.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Final tokens for `line`.
    ///
    /// `tokens` are the host tokens produced by the state machine and
    /// `handoff` its delegation signal for the line.
    pub fn dispatch(&mut self, line: &str, tokens: Vec<Token>, handoff: Option<&Handoff>) -> Vec<Token> {
        match handoff {
            None => tokens,
            Some(Handoff::Enter { language }) => {
                self.open(language);
                tokens
            }
            Some(Handoff::Body { language }) => self.body_line(language, line),
            Some(Handoff::Exit { language }) => {
                trace!("closing foreign session for {:?}", language);
                self.session = None;
                tokens
            }
        }
    }

    fn open(&mut self, language: &str) {
        let resolved = self.resolve(language).to_string();
        let tokenizer = match self.registry {
            Some(registry) => {
                let tokenizer = registry.tokenizer(&resolved);
                if tokenizer.is_none() {
                    warn!("no tokenizer for language {:?}, body left as plain text", resolved);
                }
                tokenizer
            }
            None => None,
        };
        debug!("opened foreign session for {:?}", resolved);
        self.session = Some(Session {
            language: resolved,
            tokenizer,
        });
    }

    fn body_line(&mut self, language: &str, line: &str) -> Vec<Token> {
        let resolved = self.resolve(language);
        if self.session_language() != Some(resolved) {
            self.open(language);
        }

        match self.session.as_mut().and_then(|s| s.tokenizer.as_mut()) {
            Some(tokenizer) => fill_gaps(tokenizer.tokenize_line(line), line.len(), TokenKind::Plain),
            None => whole_line(TokenKind::Plain, line),
        }
    }
}
