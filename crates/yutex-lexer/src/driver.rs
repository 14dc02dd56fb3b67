//! Line driver.
//!
//! The per-line entry point: the stack left by the previous line plus the
//! next line in, tokens plus the next stack out. No state lives here; callers
//! keep the stacks and may restart from any of them.

use crate::machine::{transition, Transition};
use log::trace;
use yutex_core::StateStack;

/// Output of the driver for one line.
pub type LineOutput = Transition;

/// Lex one line starting from `stack`.
pub fn drive_line(stack: &StateStack, line: &str) -> LineOutput {
    let output = transition(stack, line);
    if output.stack != *stack {
        trace!("stack: {} -> {}", stack, output.stack);
    }
    output
}

/// Iterator lexing the lines of a text, threading the stack between them.
#[derive(Debug, Clone)]
pub struct DriveLines<'a> {
    lines: std::str::Lines<'a>,
    stack: StateStack,
}

impl<'a> DriveLines<'a> {
    /// Stack after the last line yielded so far.
    pub fn stack(&self) -> &StateStack {
        &self.stack
    }
}

impl<'a> Iterator for DriveLines<'a> {
    type Item = (&'a str, LineOutput);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let output = drive_line(&self.stack, line);
        self.stack = output.stack.clone();
        Some((line, output))
    }
}

/// Lex every line of `text` from the initial stack.
///
/// Lines are split as by [`str::lines`]. Delegated body lines come out with
/// no tokens and a [`Handoff::Body`](crate::Handoff::Body) signal.
pub fn drive_lines(text: &str) -> DriveLines<'_> {
    drive_lines_from(StateStack::new(), text)
}

/// Lex every line of `text`, starting from a saved stack.
pub fn drive_lines_from(stack: StateStack, text: &str) -> DriveLines<'_> {
    DriveLines {
        lines: text.lines(),
        stack,
    }
}
