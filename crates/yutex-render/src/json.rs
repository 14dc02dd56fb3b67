//! JSON lines output.
//!
//! One object per source line:
//!
//! ```text
//! {"line":1,"stack":[...],"handoff":null,"tokens":[{"kind":"tag","start":0,"end":12,"text":"\\begin{math}"}]}
//! ```

use serde::Serialize;
use yutex_core::{BlockContext, Token, TokenKind};
use yutex_lexer::{Handoff, LexedLine};

#[derive(Debug, Serialize)]
struct JsonToken<'a> {
    kind: TokenKind,
    start: usize,
    end: usize,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonHandoff<'a> {
    signal: &'static str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    line: usize,
    stack: &'a [BlockContext],
    handoff: Option<JsonHandoff<'a>>,
    tokens: Vec<JsonToken<'a>>,
}

/// Name of a handoff signal as used in dumps.
pub fn signal_name(handoff: &Handoff) -> &'static str {
    match handoff {
        Handoff::Enter { .. } => "enter",
        Handoff::Body { .. } => "body",
        Handoff::Exit { .. } => "exit",
    }
}

fn token<'a>(line: &'a str, token: &Token) -> JsonToken<'a> {
    JsonToken {
        kind: token.kind,
        start: token.start(),
        end: token.end(),
        text: token.text(line),
    }
}

/// Serialize one lexed line as a single-line JSON object.
pub fn to_json_line(line_no: usize, line: &str, lexed: &LexedLine) -> serde_json::Result<String> {
    let value = JsonLine {
        line: line_no,
        stack: lexed.stack.contexts(),
        handoff: lexed.handoff.as_ref().map(|h| JsonHandoff {
            signal: signal_name(h),
            language: h.language(),
        }),
        tokens: lexed.tokens.iter().map(|t| token(line, t)).collect(),
    };
    serde_json::to_string(&value)
}
