//! Rule sets of the block state machine.
//!
//! Every [`BlockKind`] has one static [`RuleSet`]: an ordered list of
//! anchored line patterns (first match wins) and a fallback that classifies
//! lines matching none of them. Rule-set selection is a plain lookup on the
//! tag of the active context.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use yutex_core::{BlockContext, BlockKind, TokenKind};

use TokenKind::{Comment, Number, Plain, Tag};

// =============================================================================
// Regex patterns
// =============================================================================

/// `\section{ID}<trailing>`
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\section\{)([^{}]*)(\})(.*)$").unwrap());

/// `\begin{code}{LANG}<trailing>`
static CODE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{code\}\{)([^{}]*)(\})(.*)$").unwrap());

/// `\end{code}`, only whitespace may follow
static CODE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{code\})(\s*)$").unwrap());

static MATH_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{math\})(.*)$").unwrap());

static MATH_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{math\})(.*)$").unwrap());

static HTML_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{html\})(.*)$").unwrap());

/// `\end{html}`, only whitespace may follow
static HTML_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{html\})(\s*)$").unwrap());

static TABLE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{table\})(.*)$").unwrap());

static TABLE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{table\})(.*)$").unwrap());

/// `\begin{sample}{N}<trailing>` with N a positive integer without leading zero
static SAMPLE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{sample\}\{)([1-9][0-9]*)(\})(.*)$").unwrap());

static SAMPLE_INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\sample\{input\})(\s*)$").unwrap());

static SAMPLE_OUTPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\sample\{output\})(\s*)$").unwrap());

static SAMPLE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{sample\})(\s*)$").unwrap());

static MIXCODE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{mixcode\})(.*)$").unwrap());

static MIXCODE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{mixcode\})(.*)$").unwrap());

static PARAGRAPH_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{paragraph\})(.*)$").unwrap());

static PARAGRAPH_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{paragraph\})(.*)$").unwrap());

static BLOCKQUOTE_BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\begin\{blockquote\})(.*)$").unwrap());

static BLOCKQUOTE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\\end\{blockquote\})(.*)$").unwrap());

// =============================================================================
// Types
// =============================================================================

/// Stack effect of a matched rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit tokens, keep the stack
    Stay,
    /// Open a context of this kind on top of the stack
    Push(BlockKind),
    /// Close the active context
    Pop,
    /// Collapse sample / sample-input / sample-output at once
    PopSample,
}

/// How a line matching no rule of the active set is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Whole line as one token of this kind
    Line(TokenKind),
    /// Run the inline scanner over the line
    Inline,
    /// Hand the line to the foreign tokenizer of the active context
    Delegate,
}

/// One anchored line pattern.
#[derive(Debug)]
pub struct Rule {
    /// Name for tracing
    pub name: &'static str,
    /// Compiled pattern, anchored at both ends of the line
    pub pattern: &'static LazyLock<Regex>,
    /// Token kind of each capture group, in group order
    pub groups: &'static [TokenKind],
    /// Stack effect
    pub action: Action,
}

/// The ordered rules and the fallback of one block kind.
#[derive(Debug)]
pub struct RuleSet {
    /// Block kind this set belongs to
    pub kind: BlockKind,
    /// Rules, highest priority first
    pub rules: &'static [&'static Rule],
    /// Classification for lines no rule matches
    pub fallback: Fallback,
}

const DELIMITER: &[TokenKind] = &[Tag, Comment];
const PARAMETER: &[TokenKind] = &[Tag, Plain, Tag, Comment];
const INDEXED: &[TokenKind] = &[Tag, Number, Tag, Comment];

// =============================================================================
// Rules
// =============================================================================

static SECTION: Rule = Rule {
    name: "section",
    pattern: &SECTION_RE,
    groups: PARAMETER,
    action: Action::Stay,
};

static CODE_BEGIN: Rule = Rule {
    name: "code-begin",
    pattern: &CODE_BEGIN_RE,
    groups: PARAMETER,
    action: Action::Push(BlockKind::Code),
};

static CODE_END: Rule = Rule {
    name: "code-end",
    pattern: &CODE_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static MATH_BEGIN: Rule = Rule {
    name: "math-begin",
    pattern: &MATH_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::Math),
};

static MATH_END: Rule = Rule {
    name: "math-end",
    pattern: &MATH_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static HTML_BEGIN: Rule = Rule {
    name: "html-begin",
    pattern: &HTML_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::Html),
};

static HTML_END: Rule = Rule {
    name: "html-end",
    pattern: &HTML_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static TABLE_BEGIN: Rule = Rule {
    name: "table-begin",
    pattern: &TABLE_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::Table),
};

static TABLE_END: Rule = Rule {
    name: "table-end",
    pattern: &TABLE_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static SAMPLE_BEGIN: Rule = Rule {
    name: "sample-begin",
    pattern: &SAMPLE_BEGIN_RE,
    groups: INDEXED,
    action: Action::Push(BlockKind::Sample),
};

static SAMPLE_INPUT_BEGIN: Rule = Rule {
    name: "sample-input",
    pattern: &SAMPLE_INPUT_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::SampleInput),
};

static SAMPLE_OUTPUT_BEGIN: Rule = Rule {
    name: "sample-output",
    pattern: &SAMPLE_OUTPUT_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::SampleOutput),
};

static SAMPLE_END: Rule = Rule {
    name: "sample-end",
    pattern: &SAMPLE_END_RE,
    groups: DELIMITER,
    action: Action::PopSample,
};

static MIXCODE_BEGIN: Rule = Rule {
    name: "mixcode-begin",
    pattern: &MIXCODE_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::MixCode),
};

static MIXCODE_END: Rule = Rule {
    name: "mixcode-end",
    pattern: &MIXCODE_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static PARAGRAPH_BEGIN: Rule = Rule {
    name: "paragraph-begin",
    pattern: &PARAGRAPH_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::Paragraph),
};

static PARAGRAPH_END: Rule = Rule {
    name: "paragraph-end",
    pattern: &PARAGRAPH_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

static BLOCKQUOTE_BEGIN: Rule = Rule {
    name: "blockquote-begin",
    pattern: &BLOCKQUOTE_BEGIN_RE,
    groups: DELIMITER,
    action: Action::Push(BlockKind::Blockquote),
};

static BLOCKQUOTE_END: Rule = Rule {
    name: "blockquote-end",
    pattern: &BLOCKQUOTE_END_RE,
    groups: DELIMITER,
    action: Action::Pop,
};

// =============================================================================
// Rule sets
// =============================================================================

static ROOT_RULES: [&Rule; 9] = [
    &SECTION,
    &CODE_BEGIN,
    &MATH_BEGIN,
    &HTML_BEGIN,
    &TABLE_BEGIN,
    &SAMPLE_BEGIN,
    &MIXCODE_BEGIN,
    &PARAGRAPH_BEGIN,
    &BLOCKQUOTE_BEGIN,
];
static CODE_RULES: [&Rule; 1] = [&CODE_END];
static MATH_RULES: [&Rule; 1] = [&MATH_END];
static HTML_RULES: [&Rule; 1] = [&HTML_END];
static TABLE_RULES: [&Rule; 1] = [&TABLE_END];
static SAMPLE_RULES: [&Rule; 1] = [&SAMPLE_INPUT_BEGIN];
static SAMPLE_INPUT_RULES: [&Rule; 1] = [&SAMPLE_OUTPUT_BEGIN];
static SAMPLE_OUTPUT_RULES: [&Rule; 1] = [&SAMPLE_END];
static MIXCODE_RULES: [&Rule; 2] = [&MIXCODE_END, &CODE_BEGIN];
static PARAGRAPH_RULES: [&Rule; 1] = [&PARAGRAPH_END];
static BLOCKQUOTE_RULES: [&Rule; 1] = [&BLOCKQUOTE_END];

static ROOT: RuleSet = RuleSet {
    kind: BlockKind::Root,
    rules: &ROOT_RULES,
    fallback: Fallback::Line(Comment),
};

static CODE: RuleSet = RuleSet {
    kind: BlockKind::Code,
    rules: &CODE_RULES,
    fallback: Fallback::Delegate,
};

static MATH: RuleSet = RuleSet {
    kind: BlockKind::Math,
    rules: &MATH_RULES,
    fallback: Fallback::Line(Plain),
};

static HTML: RuleSet = RuleSet {
    kind: BlockKind::Html,
    rules: &HTML_RULES,
    fallback: Fallback::Delegate,
};

static TABLE: RuleSet = RuleSet {
    kind: BlockKind::Table,
    rules: &TABLE_RULES,
    fallback: Fallback::Line(Plain),
};

static SAMPLE: RuleSet = RuleSet {
    kind: BlockKind::Sample,
    rules: &SAMPLE_RULES,
    fallback: Fallback::Line(Comment),
};

static SAMPLE_INPUT: RuleSet = RuleSet {
    kind: BlockKind::SampleInput,
    rules: &SAMPLE_INPUT_RULES,
    fallback: Fallback::Line(TokenKind::Raw),
};

static SAMPLE_OUTPUT: RuleSet = RuleSet {
    kind: BlockKind::SampleOutput,
    rules: &SAMPLE_OUTPUT_RULES,
    fallback: Fallback::Line(TokenKind::Raw),
};

static MIXCODE: RuleSet = RuleSet {
    kind: BlockKind::MixCode,
    rules: &MIXCODE_RULES,
    fallback: Fallback::Line(Comment),
};

static PARAGRAPH: RuleSet = RuleSet {
    kind: BlockKind::Paragraph,
    rules: &PARAGRAPH_RULES,
    fallback: Fallback::Inline,
};

static BLOCKQUOTE: RuleSet = RuleSet {
    kind: BlockKind::Blockquote,
    rules: &BLOCKQUOTE_RULES,
    fallback: Fallback::Inline,
};

/// Look up the rule set of a block kind.
pub fn rule_set(kind: BlockKind) -> &'static RuleSet {
    match kind {
        BlockKind::Root => &ROOT,
        BlockKind::Code => &CODE,
        BlockKind::Math => &MATH,
        BlockKind::Html => &HTML,
        BlockKind::Table => &TABLE,
        BlockKind::Sample => &SAMPLE,
        BlockKind::SampleInput => &SAMPLE_INPUT,
        BlockKind::SampleOutput => &SAMPLE_OUTPUT,
        BlockKind::MixCode => &MIXCODE,
        BlockKind::Paragraph => &PARAGRAPH,
        BlockKind::Blockquote => &BLOCKQUOTE,
    }
}

/// Build the context a `Push` rule opens.
///
/// `caps` are the captures of the opening line and `active` the context the
/// line was matched in. Returns `None` when the captured parameter cannot be
/// turned into a context (a sample index overflowing `u64`), in which case
/// the rule is treated as not matching.
pub fn open_context(kind: BlockKind, caps: &Captures, active: &BlockContext) -> Option<BlockContext> {
    let context = match kind {
        BlockKind::Root => return None,
        BlockKind::Code => BlockContext::Code {
            language: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        },
        BlockKind::Math => BlockContext::Math,
        BlockKind::Html => BlockContext::Html,
        BlockKind::Table => BlockContext::Table,
        BlockKind::Sample => BlockContext::Sample {
            index: caps.get(2)?.as_str().parse().ok()?,
        },
        BlockKind::SampleInput => BlockContext::SampleInput {
            index: active.index()?,
        },
        BlockKind::SampleOutput => BlockContext::SampleOutput {
            index: active.index()?,
        },
        BlockKind::MixCode => BlockContext::MixCode,
        BlockKind::Paragraph => BlockContext::Paragraph,
        BlockKind::Blockquote => BlockContext::Blockquote,
    };
    Some(context)
}
