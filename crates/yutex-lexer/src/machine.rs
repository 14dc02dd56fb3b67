//! Block state machine.
//!
//! One step of the automaton: given the stack left by the previous line and
//! the next line, try the active rule set in order and apply the first rule
//! that matches, or fall back to the set's default classification.

use crate::classify::{classify_captures, whole_line};
use crate::embed::Handoff;
use crate::inline;
use crate::rules::{open_context, rule_set, Action, Fallback, RuleSet};
use log::trace;
use yutex_core::{StateStack, Token};

/// Result of lexing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Host tokens, left to right. Empty for delegated body lines.
    pub tokens: Vec<Token>,
    /// Stack at the end of the line
    pub stack: StateStack,
    /// Delegation signal, if the line starts, continues or ends a foreign body
    pub handoff: Option<Handoff>,
}

impl Transition {
    /// Whether the line belongs to a foreign tokenizer.
    pub fn is_foreign(&self) -> bool {
        matches!(self.handoff, Some(Handoff::Body { .. }))
    }
}

/// Advance the automaton by one line.
///
/// Pure and total: every line produces a transition, malformed delimiters
/// degrade to the active context's fallback.
pub fn transition(stack: &StateStack, line: &str) -> Transition {
    apply(rule_set(stack.top().kind()), stack, line)
}

/// Run `set` against `line` with `stack` as the incoming state.
pub fn apply(set: &RuleSet, stack: &StateStack, line: &str) -> Transition {
    for rule in set.rules {
        let Some(caps) = rule.pattern.captures(line) else {
            continue;
        };

        let mut next = stack.clone();
        let handoff = match rule.action {
            Action::Stay => None,
            Action::Push(kind) => {
                let Some(context) = open_context(kind, &caps, stack.top()) else {
                    trace!("{}: rule {} rejected its parameter", set.kind, rule.name);
                    continue;
                };
                let handoff = context.language().map(|language| Handoff::Enter {
                    language: language.to_string(),
                });
                trace!("{}: {} pushes {}", set.kind, rule.name, context);
                next.push(context);
                handoff
            }
            Action::Pop => {
                let popped = next.pop();
                trace!("{}: {} pops {:?}", set.kind, rule.name, popped);
                popped.and_then(|context| {
                    context.language().map(|language| Handoff::Exit {
                        language: language.to_string(),
                    })
                })
            }
            Action::PopSample => {
                next.pop_sample();
                trace!("{}: {} collapses the sample to {}", set.kind, rule.name, next);
                None
            }
        };

        return Transition {
            tokens: classify_captures(&caps, rule.groups),
            stack: next,
            handoff,
        };
    }

    let (tokens, handoff) = match set.fallback {
        Fallback::Line(kind) => (whole_line(kind, line), None),
        Fallback::Inline => (inline::scan(line), None),
        Fallback::Delegate => {
            let language = stack.top().language().unwrap_or_default().to_string();
            (Vec::new(), Some(Handoff::Body { language }))
        }
    };

    Transition {
        tokens,
        stack: stack.clone(),
        handoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yutex_core::{BlockContext, BlockKind, TokenKind};

    fn run(lines: &[&str]) -> (Vec<Transition>, StateStack) {
        let mut stack = StateStack::new();
        let mut out = Vec::new();
        for line in lines {
            let t = transition(&stack, line);
            stack = t.stack.clone();
            out.push(t);
        }
        (out, stack)
    }

    fn kinds(t: &Transition) -> Vec<TokenKind> {
        t.tokens.iter().map(|t| t.kind).collect()
    }

    fn code(language: &str) -> BlockContext {
        BlockContext::Code {
            language: language.to_string(),
        }
    }

    #[test]
    fn test_root_fallback_is_comment() {
        let t = transition(&StateStack::new(), "hello world");
        assert_eq!(t.tokens, vec![Token::new(TokenKind::Comment, 0, 11)]);
        assert!(t.stack.is_root());
        assert_eq!(t.handoff, None);
    }

    #[test]
    fn test_section() {
        let line = "\\section{intro} Introduction";
        let t = transition(&StateStack::new(), line);
        assert_eq!(
            kinds(&t),
            vec![TokenKind::Tag, TokenKind::Plain, TokenKind::Tag, TokenKind::Comment]
        );
        assert_eq!(t.tokens[1].text(line), "intro");
        assert!(t.stack.is_root());
    }

    #[test]
    fn test_code_block_handoff() {
        let (out, stack) = run(&["\\begin{code}{rust}", "fn main() {}", "\\end{code}"]);
        assert_eq!(
            out[0].handoff,
            Some(Handoff::Enter {
                language: "rust".to_string()
            })
        );
        assert_eq!(out[0].stack.top(), &code("rust"));
        assert!(out[1].tokens.is_empty());
        assert!(out[1].is_foreign());
        assert_eq!(out[1].handoff.as_ref().map(|h| h.language()), Some("rust"));
        assert_eq!(
            out[2].handoff,
            Some(Handoff::Exit {
                language: "rust".to_string()
            })
        );
        assert_eq!(kinds(&out[2]), vec![TokenKind::Tag]);
        assert!(stack.is_root());
    }

    #[test]
    fn test_code_close_needs_exact_line() {
        let (out, stack) = run(&["\\begin{code}{go}", "\\end{code} nope", " \\end{code}"]);
        assert!(out[1].is_foreign());
        assert!(out[2].is_foreign());
        assert_eq!(stack.top(), &code("go"));
    }

    #[test]
    fn test_code_body_ignores_markup() {
        let (out, _) = run(&["\\begin{code}{tex}", "\\begin{math}", "\\section{x}"]);
        assert!(out[1].is_foreign());
        assert!(out[2].is_foreign());
        assert_eq!(out[2].stack.depth(), 2);
    }

    #[test]
    fn test_html_delegates_to_markup() {
        let (out, stack) = run(&["\\begin{html} raw", "<b>hi</b>", "\\end{html}  "]);
        assert_eq!(kinds(&out[0]), vec![TokenKind::Tag, TokenKind::Comment]);
        assert_eq!(out[0].handoff.as_ref().map(|h| h.language()), Some("markup"));
        assert_eq!(out[1].handoff.as_ref().map(|h| h.language()), Some("markup"));
        assert_eq!(kinds(&out[2]), vec![TokenKind::Tag, TokenKind::Comment]);
        assert!(matches!(out[2].handoff, Some(Handoff::Exit { .. })));
        assert!(stack.is_root());
    }

    #[test]
    fn test_math_and_table_bodies_are_plain() {
        let (out, stack) = run(&["\\begin{math}", "x^2", "\\end{math} % done", "\\begin{table}", "a | b", "\\end{table}"]);
        assert_eq!(kinds(&out[1]), vec![TokenKind::Plain]);
        assert_eq!(kinds(&out[2]), vec![TokenKind::Tag, TokenKind::Comment]);
        assert_eq!(kinds(&out[4]), vec![TokenKind::Plain]);
        assert!(out.iter().all(|t| t.handoff.is_none()));
        assert!(stack.is_root());
    }

    #[test]
    fn test_sample_triad_pops_all() {
        let (out, stack) = run(&[
            "\\begin{sample}{3}",
            "preamble",
            "\\sample{input}",
            "1 2",
            "\\sample{output}",
            "3",
            "\\end{sample}",
        ]);
        assert_eq!(
            kinds(&out[0]),
            vec![TokenKind::Tag, TokenKind::Number, TokenKind::Tag]
        );
        assert_eq!(out[0].stack.top(), &BlockContext::Sample { index: 3 });
        assert_eq!(kinds(&out[1]), vec![TokenKind::Comment]);
        assert_eq!(out[2].stack.top(), &BlockContext::SampleInput { index: 3 });
        assert_eq!(kinds(&out[3]), vec![TokenKind::Raw]);
        assert_eq!(out[4].stack.depth(), 4);
        assert_eq!(kinds(&out[5]), vec![TokenKind::Raw]);
        assert!(out[6].stack.is_root());
        assert!(stack.is_root());
    }

    #[test]
    fn test_sample_index_must_be_positive() {
        for line in ["\\begin{sample}{0}", "\\begin{sample}{x}", "\\begin{sample}{007}"] {
            let t = transition(&StateStack::new(), line);
            assert!(t.stack.is_root(), "{line} should not open a sample");
            assert_eq!(kinds(&t), vec![TokenKind::Comment]);
        }
    }

    #[test]
    fn test_sample_does_not_nest() {
        let (out, _) = run(&["\\begin{sample}{1}", "\\begin{sample}{2}", "\\sample{input}", "\\begin{sample}{3}"]);
        assert_eq!(out[1].stack.depth(), 2);
        assert_eq!(kinds(&out[1]), vec![TokenKind::Comment]);
        assert_eq!(kinds(&out[3]), vec![TokenKind::Raw]);
        assert_eq!(out[3].stack.depth(), 3);
    }

    #[test]
    fn test_end_sample_only_in_output() {
        let (out, _) = run(&["\\begin{sample}{1}", "\\end{sample}", "\\sample{input}", "\\end{sample}"]);
        assert_eq!(out[1].stack.depth(), 2);
        assert_eq!(out[3].stack.depth(), 3);
        assert_eq!(kinds(&out[3]), vec![TokenKind::Raw]);
    }

    #[test]
    fn test_sample_header_trailing_text() {
        let line = "\\begin{sample}{4} text";
        let t = transition(&StateStack::new(), line);
        assert_eq!(
            kinds(&t),
            vec![TokenKind::Tag, TokenKind::Number, TokenKind::Tag, TokenKind::Comment]
        );
        assert_eq!(t.tokens[3].text(line), " text");
        assert_eq!(t.stack.top(), &BlockContext::Sample { index: 4 });
    }

    #[test]
    fn test_sample_delimiters_reject_trailing_text() {
        let sample = StateStack::from_contexts([BlockContext::Sample { index: 1 }]);
        let t = transition(&sample, "\\sample{input} x");
        assert_eq!(kinds(&t), vec![TokenKind::Comment]);
        assert_eq!(t.stack, sample);

        let input = StateStack::from_contexts([
            BlockContext::Sample { index: 1 },
            BlockContext::SampleInput { index: 1 },
        ]);
        let t = transition(&input, "\\sample{output} x");
        assert_eq!(kinds(&t), vec![TokenKind::Raw]);
        assert_eq!(t.stack, input);

        let output = StateStack::from_contexts([
            BlockContext::Sample { index: 1 },
            BlockContext::SampleInput { index: 1 },
            BlockContext::SampleOutput { index: 1 },
        ]);
        let t = transition(&output, "\\end{sample} x");
        assert_eq!(kinds(&t), vec![TokenKind::Raw]);
        assert_eq!(t.stack, output);
    }

    #[test]
    fn test_sample_end_allows_trailing_whitespace() {
        let output = StateStack::from_contexts([
            BlockContext::MixCode,
            BlockContext::Sample { index: 2 },
            BlockContext::SampleInput { index: 2 },
            BlockContext::SampleOutput { index: 2 },
        ]);
        let line = "\\end{sample}  ";
        let t = transition(&output, line);
        assert_eq!(kinds(&t), vec![TokenKind::Tag, TokenKind::Comment]);
        assert_eq!(t.tokens[1].text(line), "  ");
        assert_eq!(t.stack.contexts(), &[BlockContext::Root, BlockContext::MixCode]);
    }

    #[test]
    fn test_mixcode_nesting() {
        let (out, stack) = run(&[
            "\\begin{mixcode}",
            "some prose",
            "\\begin{code}{python}",
            "print(1)",
            "\\end{code}",
            "more prose",
            "\\end{mixcode}",
        ]);
        assert_eq!(kinds(&out[1]), vec![TokenKind::Comment]);
        assert_eq!(
            out[2].stack.contexts(),
            &[BlockContext::Root, BlockContext::MixCode, code("python")]
        );
        assert!(out[3].is_foreign());
        assert_eq!(out[4].stack.top(), &BlockContext::MixCode);
        assert_eq!(kinds(&out[5]), vec![TokenKind::Comment]);
        assert!(stack.is_root());
    }

    #[test]
    fn test_mixcode_ignores_other_blocks() {
        let t = transition(&StateStack::from_contexts([BlockContext::MixCode]), "\\begin{math}");
        assert_eq!(t.stack.top(), &BlockContext::MixCode);
        assert_eq!(kinds(&t), vec![TokenKind::Comment]);
    }

    #[test]
    fn test_paragraph_runs_inline_scanner() {
        let (out, stack) = run(&["\\begin{paragraph}", "see \\link{u}{l}", "\\end{paragraph}"]);
        assert_eq!(out[1].tokens[0].kind, TokenKind::Plain);
        assert!(out[1].tokens[1..].iter().all(|t| t.kind == TokenKind::Link));
        assert!(stack.is_root());
    }

    #[test]
    fn test_blockquote_runs_inline_scanner() {
        let stack = StateStack::from_contexts([BlockContext::Blockquote]);
        let t = transition(&stack, "\\newline");
        assert_eq!(kinds(&t), vec![TokenKind::Number]);
        assert_eq!(t.stack.top().kind(), BlockKind::Blockquote);
    }

    #[test]
    fn test_empty_line_yields_no_tokens() {
        let (out, _) = run(&["", "\\begin{math}", ""]);
        assert!(out[0].tokens.is_empty());
        assert!(out[2].tokens.is_empty());
    }

    #[test]
    fn test_empty_code_language() {
        let t = transition(&StateStack::new(), "\\begin{code}{}");
        assert_eq!(kinds(&t), vec![TokenKind::Tag, TokenKind::Tag]);
        assert_eq!(t.stack.top(), &code(""));
        assert_eq!(t.handoff.as_ref().map(|h| h.language()), Some(""));
    }

    #[test]
    fn test_indented_delimiters_are_ignored() {
        let t = transition(&StateStack::new(), "  \\begin{paragraph}");
        assert!(t.stack.is_root());
        assert_eq!(kinds(&t), vec![TokenKind::Comment]);
    }
}
