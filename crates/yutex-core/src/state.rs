//! Lexer state for line-by-line yutex processing.
//!
//! The whole state carried from one line to the next is a [`StateStack`]:
//! an ordered list of [`BlockContext`]s with the root context at the bottom.
//! It is a plain value owned by the caller, so a stack saved at the end of
//! any line can be used to restart lexing from the following line.

use crate::enums::BlockKind;
use serde::{Deserialize, Serialize};

/// Language identifier handed to the foreign tokenizer for `\begin{html}`.
pub const MARKUP_LANGUAGE: &str = "markup";

/// One entry of the state stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BlockContext {
    /// Document level, always at the bottom of the stack
    Root,
    /// Code block whose body is delegated to `language`
    Code {
        /// Language captured from `\begin{code}{LANG}`, trimmed
        language: String,
    },
    /// Math block
    Math,
    /// HTML block, delegated to [`MARKUP_LANGUAGE`]
    Html,
    /// Table block
    Table,
    /// Sample preamble
    Sample {
        /// Positive sample index
        index: u64,
    },
    /// Sample input lines
    SampleInput {
        /// Index of the enclosing sample
        index: u64,
    },
    /// Sample output lines
    SampleOutput {
        /// Index of the enclosing sample
        index: u64,
    },
    /// Mixed prose and code block
    MixCode,
    /// Paragraph block
    Paragraph,
    /// Blockquote block
    Blockquote,
}

impl BlockContext {
    /// The tag used to select this context's rule set.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContext::Root => BlockKind::Root,
            BlockContext::Code { .. } => BlockKind::Code,
            BlockContext::Math => BlockKind::Math,
            BlockContext::Html => BlockKind::Html,
            BlockContext::Table => BlockKind::Table,
            BlockContext::Sample { .. } => BlockKind::Sample,
            BlockContext::SampleInput { .. } => BlockKind::SampleInput,
            BlockContext::SampleOutput { .. } => BlockKind::SampleOutput,
            BlockContext::MixCode => BlockKind::MixCode,
            BlockContext::Paragraph => BlockKind::Paragraph,
            BlockContext::Blockquote => BlockKind::Blockquote,
        }
    }

    /// Language that owns the body of this context, if it is delegated.
    pub fn language(&self) -> Option<&str> {
        match self {
            BlockContext::Code { language } => Some(language),
            BlockContext::Html => Some(MARKUP_LANGUAGE),
            _ => None,
        }
    }

    /// Sample index carried by the three sample contexts.
    pub fn index(&self) -> Option<u64> {
        match self {
            BlockContext::Sample { index }
            | BlockContext::SampleInput { index }
            | BlockContext::SampleOutput { index } => Some(*index),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockContext::Code { language } => write!(f, "code({})", language),
            BlockContext::Sample { index }
            | BlockContext::SampleInput { index }
            | BlockContext::SampleOutput { index } => write!(f, "{}({})", self.kind(), index),
            other => write!(f, "{}", other.kind()),
        }
    }
}

/// Stack of block contexts, root at the bottom.
///
/// The stack is never empty and the root is never popped.
///
/// # Example
///
/// ```
/// use yutex_core::{BlockContext, StateStack};
///
/// let mut stack = StateStack::new();
/// stack.push(BlockContext::MixCode);
/// assert_eq!(stack.depth(), 2);
/// stack.pop();
/// assert!(stack.is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<BlockContext>", into = "Vec<BlockContext>")]
pub struct StateStack {
    contexts: Vec<BlockContext>,
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<BlockContext>> for StateStack {
    fn from(contexts: Vec<BlockContext>) -> Self {
        Self::from_contexts(contexts)
    }
}

impl From<StateStack> for Vec<BlockContext> {
    fn from(stack: StateStack) -> Self {
        stack.contexts
    }
}

impl StateStack {
    /// The initial stack for line 1 of a document.
    pub fn new() -> Self {
        Self {
            contexts: vec![BlockContext::Root],
        }
    }

    /// Build a stack from saved contexts, bottom first.
    ///
    /// Any `Root` entries are dropped and a single root is put at the
    /// bottom, so the result always satisfies the stack invariant.
    pub fn from_contexts(contexts: impl IntoIterator<Item = BlockContext>) -> Self {
        let mut stack = Self::new();
        for context in contexts {
            stack.push(context);
        }
        stack
    }

    /// Number of contexts, root included. Always at least 1.
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Whether only the root context is left.
    pub fn is_root(&self) -> bool {
        self.contexts.len() == 1
    }

    /// The active context.
    pub fn top(&self) -> &BlockContext {
        // The root is never removed, so `last` always exists.
        self.contexts.last().unwrap_or(&BlockContext::Root)
    }

    /// All contexts, bottom first.
    pub fn contexts(&self) -> &[BlockContext] {
        &self.contexts
    }

    /// Contexts above the root, bottom first.
    pub fn open_blocks(&self) -> &[BlockContext] {
        &self.contexts[1..]
    }

    /// Push a context. Pushing `Root` is a no-op.
    pub fn push(&mut self, context: BlockContext) {
        if context != BlockContext::Root {
            self.contexts.push(context);
        }
    }

    /// Pop the active context. Returns `None` when only the root is left.
    pub fn pop(&mut self) -> Option<BlockContext> {
        if self.is_root() {
            None
        } else {
            self.contexts.pop()
        }
    }

    /// Collapse the innermost sample triad in one step.
    ///
    /// Removes the innermost `Sample` context and everything above it,
    /// restoring the stack held just before `\begin{sample}{N}`. Without a
    /// sample context on the stack this pops down to the root.
    pub fn pop_sample(&mut self) {
        let keep = self
            .contexts
            .iter()
            .rposition(|c| matches!(c, BlockContext::Sample { .. }))
            .unwrap_or(1)
            .max(1);
        self.contexts.truncate(keep);
    }
}

impl std::fmt::Display for StateStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(lang: &str) -> BlockContext {
        BlockContext::Code {
            language: lang.to_string(),
        }
    }

    #[test]
    fn test_new_stack() {
        let stack = StateStack::new();
        assert_eq!(stack.depth(), 1);
        assert!(stack.is_root());
        assert_eq!(stack.top(), &BlockContext::Root);
        assert!(stack.open_blocks().is_empty());
    }

    #[test]
    fn test_root_never_popped() {
        let mut stack = StateStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 1);

        stack.push(BlockContext::Root);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_push_pop() {
        let mut stack = StateStack::new();
        stack.push(BlockContext::MixCode);
        stack.push(code("rust"));
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.top().kind(), BlockKind::Code);

        assert_eq!(stack.pop(), Some(code("rust")));
        assert_eq!(stack.top(), &BlockContext::MixCode);
    }

    #[test]
    fn test_pop_sample() {
        let mut stack = StateStack::new();
        stack.push(BlockContext::Sample { index: 1 });
        stack.push(BlockContext::SampleInput { index: 1 });
        stack.push(BlockContext::SampleOutput { index: 1 });
        stack.pop_sample();
        assert!(stack.is_root());
    }

    #[test]
    fn test_pop_sample_keeps_outer_contexts() {
        let mut stack = StateStack::from_contexts([
            BlockContext::MixCode,
            BlockContext::Sample { index: 2 },
            BlockContext::SampleInput { index: 2 },
            BlockContext::SampleOutput { index: 2 },
        ]);
        stack.pop_sample();
        assert_eq!(stack.contexts(), &[BlockContext::Root, BlockContext::MixCode]);
    }

    #[test]
    fn test_pop_sample_without_sample() {
        let mut stack = StateStack::from_contexts([BlockContext::Table, BlockContext::Math]);
        stack.pop_sample();
        assert!(stack.is_root());
    }

    #[test]
    fn test_from_contexts_normalizes_root() {
        let stack = StateStack::from_contexts([
            BlockContext::Root,
            BlockContext::Paragraph,
            BlockContext::Root,
        ]);
        assert_eq!(stack.contexts(), &[BlockContext::Root, BlockContext::Paragraph]);

        let empty = StateStack::from_contexts(Vec::new());
        assert!(empty.is_root());
    }

    #[test]
    fn test_context_language() {
        assert_eq!(code("go").language(), Some("go"));
        assert_eq!(BlockContext::Html.language(), Some(MARKUP_LANGUAGE));
        assert_eq!(BlockContext::Math.language(), None);
    }

    #[test]
    fn test_context_index() {
        assert_eq!(BlockContext::SampleOutput { index: 7 }.index(), Some(7));
        assert_eq!(BlockContext::Paragraph.index(), None);
    }

    #[test]
    fn test_display() {
        let stack = StateStack::from_contexts([
            BlockContext::MixCode,
            code("rust"),
        ]);
        assert_eq!(stack.to_string(), "root > mixcode > code(rust)");
        assert_eq!(BlockContext::SampleInput { index: 3 }.to_string(), "sample-input(3)");
    }

    #[test]
    fn test_serde_roundtrip() {
        let stack = StateStack::from_contexts([
            BlockContext::Sample { index: 12 },
            BlockContext::SampleInput { index: 12 },
        ]);
        let json = serde_json::to_string(&stack).unwrap();
        assert!(json.contains("\"kind\":\"sample-input\""));
        let back: StateStack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stack);
    }

    #[test]
    fn test_deserialize_restores_invariant() {
        let back: StateStack = serde_json::from_str(r#"[{"kind":"math"}]"#).unwrap();
        assert_eq!(back.contexts(), &[BlockContext::Root, BlockContext::Math]);
    }
}
