//! Core enums for yutex lexing.
//!
//! [`TokenKind`] is the semantic category attached to every emitted span,
//! [`BlockKind`] is the tag of a context on the lexer's state stack.

use serde::{Deserialize, Serialize};

/// Semantic category of a token.
///
/// The first group is produced by the markup lexer itself; the second group
/// only appears in lines classified by a foreign-language tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Structural delimiters (`\begin{code}{`, `\end{math}`, ...)
    Tag,
    /// Default text: prose, section ids, code languages
    Plain,
    /// Trailing text after delimiters and opaque comment lines
    Comment,
    /// Sample indices, `\newline` and `\space`
    Number,
    /// `\link{..}{..}` escapes
    Link,
    /// `\text{..}{..}` escapes
    String,
    /// `\math{..}` / `\math[..]` escapes
    Formula,
    /// `\html{..}` / `\html[..]` escapes
    Markup,
    /// Untokenized sample input/output lines
    Raw,

    /// Language keywords
    Keyword,
    /// Type names
    Type,
    /// Function names
    Function,
    /// Variables and parameters
    Variable,
    /// Operators
    Operator,
    /// Punctuation
    Punctuation,
    /// Constants and language literals
    Constant,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [TokenKind; 16] = [
        TokenKind::Tag,
        TokenKind::Plain,
        TokenKind::Comment,
        TokenKind::Number,
        TokenKind::Link,
        TokenKind::String,
        TokenKind::Formula,
        TokenKind::Markup,
        TokenKind::Raw,
        TokenKind::Keyword,
        TokenKind::Type,
        TokenKind::Function,
        TokenKind::Variable,
        TokenKind::Operator,
        TokenKind::Punctuation,
        TokenKind::Constant,
    ];

    /// Lowercase name of this kind, as used in config files and dumps.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Tag => "tag",
            TokenKind::Plain => "plain",
            TokenKind::Comment => "comment",
            TokenKind::Number => "number",
            TokenKind::Link => "link",
            TokenKind::String => "string",
            TokenKind::Formula => "formula",
            TokenKind::Markup => "markup",
            TokenKind::Raw => "raw",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Function => "function",
            TokenKind::Variable => "variable",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Constant => "constant",
        }
    }

    /// Parse a token kind from its name (case insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == lower)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag of a block context, used to select the active rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Document level
    Root,
    /// `\begin{code}{LANG}` body, delegated to LANG
    Code,
    /// `\begin{math}` body
    Math,
    /// `\begin{html}` body, delegated to the markup tokenizer
    Html,
    /// `\begin{table}` body
    Table,
    /// `\begin{sample}{N}` preamble
    Sample,
    /// Lines after `\sample{input}`
    SampleInput,
    /// Lines after `\sample{output}`
    SampleOutput,
    /// `\begin{mixcode}` body
    MixCode,
    /// `\begin{paragraph}` body
    Paragraph,
    /// `\begin{blockquote}` body
    Blockquote,
}

impl BlockKind {
    /// Whether lines in this context are owned by a foreign tokenizer.
    pub fn is_delegated(&self) -> bool {
        matches!(self, BlockKind::Code | BlockKind::Html)
    }

    /// Whether lines in this context are run through the inline scanner.
    pub fn is_prose(&self) -> bool {
        matches!(self, BlockKind::Paragraph | BlockKind::Blockquote)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Root => write!(f, "root"),
            BlockKind::Code => write!(f, "code"),
            BlockKind::Math => write!(f, "math"),
            BlockKind::Html => write!(f, "html"),
            BlockKind::Table => write!(f, "table"),
            BlockKind::Sample => write!(f, "sample"),
            BlockKind::SampleInput => write!(f, "sample-input"),
            BlockKind::SampleOutput => write!(f, "sample-output"),
            BlockKind::MixCode => write!(f, "mixcode"),
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::Blockquote => write!(f, "blockquote"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_from_name() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("Formula"), Some(TokenKind::Formula));
        assert_eq!(TokenKind::from_name("nope"), None);
        assert_eq!(TokenKind::from_name(""), None);
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Tag.to_string(), "tag");
        assert_eq!(TokenKind::Raw.to_string(), "raw");
    }

    #[test]
    fn test_block_kind_display() {
        assert_eq!(BlockKind::Root.to_string(), "root");
        assert_eq!(BlockKind::SampleInput.to_string(), "sample-input");
        assert_eq!(BlockKind::SampleOutput.to_string(), "sample-output");
        assert_eq!(BlockKind::MixCode.to_string(), "mixcode");
    }

    #[test]
    fn test_block_kind_predicates() {
        assert!(BlockKind::Code.is_delegated());
        assert!(BlockKind::Html.is_delegated());
        assert!(!BlockKind::MixCode.is_delegated());
        assert!(BlockKind::Paragraph.is_prose());
        assert!(BlockKind::Blockquote.is_prose());
        assert!(!BlockKind::Root.is_prose());
    }
}
