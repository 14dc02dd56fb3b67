//! Token types for yutex

use crate::enums::TokenKind;
use serde::{Deserialize, Serialize};

/// Byte range within a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The text this span covers in `line`.
    ///
    /// Returns an empty string when the span does not fit the line.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.start..self.end).unwrap_or("")
    }

    /// Move the span right by `offset` bytes.
    pub fn shifted(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

/// A classified span of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Semantic category
    pub kind: TokenKind,
    /// Location within the line
    pub span: Span,
}

impl Token {
    /// Create a token covering `start..end`
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    /// Byte offset where this token starts
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset where this token ends
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Length of this token in bytes
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Check if token is empty
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The text this token covers in `line`.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        self.span.slice(line)
    }
}
