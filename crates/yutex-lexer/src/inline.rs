//! Inline escape scanner.
//!
//! Runs over the body lines of paragraph and blockquote blocks and picks out
//! the six inline escape forms:
//!
//! - `\link{URL}{LABEL}`
//! - `\text{CONTENT}{OPTS}`
//! - `\newline` and `\space`
//! - `\math{..}` and `\math[..]`
//! - `\html{..}` and `\html[..]`
//!
//! Escapes are found left to right without overlap. At a given position the
//! forms are tried in the order above. Text between escapes is plain prose.

use crate::classify::fill_gaps;
use regex::Regex;
use std::sync::LazyLock;
use yutex_core::{Span, Token, TokenKind};

const LINK: &str = r"(\\link\{)([^{}]*)(\}\{)([^{}]*)(\})";
const TEXT: &str = r"(\\text\{)([^{}]*)(\}\{)([^{}]*)(\})";
const NEWLINE: &str = r"(\\newline)";
const SPACE: &str = r"(\\space)";
const MATH_BRACE: &str = r"(\\math\{)([^{}]*)(\})";
const MATH_BRACKET: &str = r"(\\math\[)([^\[\]]*)(\])";
const HTML_BRACE: &str = r"(\\html\{)([^{}]*)(\})";
const HTML_BRACKET: &str = r"(\\html\[)([^\[\]]*)(\])";

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(LINK).unwrap());
static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(TEXT).unwrap());
static NEWLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NEWLINE).unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SPACE).unwrap());
static MATH_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(MATH_BRACE).unwrap());
static MATH_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(MATH_BRACKET).unwrap());
static HTML_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(HTML_BRACE).unwrap());
static HTML_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(HTML_BRACKET).unwrap());

/// All forms as one alternation, in priority order. Each branch is wrapped
/// in a group named after its form. Leftmost-first matching picks the
/// earliest start and, among escapes starting there, the first branch.
static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let branches: Vec<String> = EscapeForm::ALL
        .iter()
        .map(|form| format!("(?P<{}>{})", form.group(), form.source()))
        .collect();
    Regex::new(&branches.join("|")).unwrap()
});

/// The inline escape forms, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeForm {
    Link,
    Text,
    Newline,
    Space,
    MathBrace,
    MathBracket,
    HtmlBrace,
    HtmlBracket,
}

impl EscapeForm {
    /// Every form, highest priority first.
    pub const ALL: [EscapeForm; 8] = [
        EscapeForm::Link,
        EscapeForm::Text,
        EscapeForm::Newline,
        EscapeForm::Space,
        EscapeForm::MathBrace,
        EscapeForm::MathBracket,
        EscapeForm::HtmlBrace,
        EscapeForm::HtmlBracket,
    ];

    /// Token kind shared by the delimiters and payloads of this form.
    pub fn kind(&self) -> TokenKind {
        match self {
            EscapeForm::Link => TokenKind::Link,
            EscapeForm::Text => TokenKind::String,
            EscapeForm::Newline | EscapeForm::Space => TokenKind::Number,
            EscapeForm::MathBrace | EscapeForm::MathBracket => TokenKind::Formula,
            EscapeForm::HtmlBrace | EscapeForm::HtmlBracket => TokenKind::Markup,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            EscapeForm::Link => &LINK_RE,
            EscapeForm::Text => &TEXT_RE,
            EscapeForm::Newline => &NEWLINE_RE,
            EscapeForm::Space => &SPACE_RE,
            EscapeForm::MathBrace => &MATH_BRACE_RE,
            EscapeForm::MathBracket => &MATH_BRACKET_RE,
            EscapeForm::HtmlBrace => &HTML_BRACE_RE,
            EscapeForm::HtmlBracket => &HTML_BRACKET_RE,
        }
    }

    fn source(&self) -> &'static str {
        match self {
            EscapeForm::Link => LINK,
            EscapeForm::Text => TEXT,
            EscapeForm::Newline => NEWLINE,
            EscapeForm::Space => SPACE,
            EscapeForm::MathBrace => MATH_BRACE,
            EscapeForm::MathBracket => MATH_BRACKET,
            EscapeForm::HtmlBrace => HTML_BRACE,
            EscapeForm::HtmlBracket => HTML_BRACKET,
        }
    }

    /// Name of this form's branch in the combined pattern.
    fn group(&self) -> &'static str {
        match self {
            EscapeForm::Link => "link",
            EscapeForm::Text => "text",
            EscapeForm::Newline => "newline",
            EscapeForm::Space => "space",
            EscapeForm::MathBrace => "math_brace",
            EscapeForm::MathBracket => "math_bracket",
            EscapeForm::HtmlBrace => "html_brace",
            EscapeForm::HtmlBracket => "html_bracket",
        }
    }

    /// Delimiter and payload tokens of an escape of this form at `span`.
    fn tokens(&self, line: &str, span: Span) -> Vec<Token> {
        let kind = self.kind();
        let Some(caps) = self.pattern().captures(span.slice(line)) else {
            return Vec::new();
        };
        caps.iter()
            .skip(1)
            .flatten()
            .filter(|m| !m.is_empty())
            .map(|m| Token {
                kind,
                span: Span::new(m.start(), m.end()).shifted(span.start),
            })
            .collect()
    }
}

/// One escape found in a prose line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEscape {
    /// Which escape this is
    pub form: EscapeForm,
    /// Extent of the whole escape
    pub span: Span,
    /// Delimiter and payload tokens, left to right, empty payloads omitted
    pub tokens: Vec<Token>,
}

/// Find all inline escapes in `line`, left to right, non-overlapping.
///
/// One pass over the line: the cost grows with the line length, not with
/// the number of escapes times the length.
pub fn find_escapes(line: &str) -> Vec<InlineEscape> {
    ESCAPE_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let form = EscapeForm::ALL
                .into_iter()
                .find(|form| caps.name(form.group()).is_some())?;
            let whole = caps.get(0)?;
            let span = Span::new(whole.start(), whole.end());
            Some(InlineEscape {
                form,
                span,
                tokens: form.tokens(line, span),
            })
        })
        .collect()
}

/// Classify a prose line: escape tokens with plain prose in between.
///
/// The result covers the whole line. An empty line yields no tokens.
///
/// # Example
///
/// ```
/// use yutex_core::TokenKind;
/// use yutex_lexer::inline::scan;
///
/// let tokens = scan("see \\math{x}");
/// assert_eq!(tokens[0].kind, TokenKind::Plain);
/// assert_eq!(tokens[1].kind, TokenKind::Formula);
/// ```
pub fn scan(line: &str) -> Vec<Token> {
    let tokens = find_escapes(line)
        .into_iter()
        .flat_map(|escape| escape.tokens)
        .collect();
    fill_gaps(tokens, line.len(), TokenKind::Plain)
}
