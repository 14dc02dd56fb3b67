//! Token classification helpers.
//!
//! Pure functions turning pattern captures and whole lines into ordered,
//! non-overlapping token lists.

use regex::Captures;
use yutex_core::{Token, TokenKind};

/// Map capture groups 1..=n onto `kinds`, in group order.
///
/// Groups that did not participate or matched the empty string are skipped,
/// so no empty token is ever produced.
pub fn classify_captures(caps: &Captures, kinds: &[TokenKind]) -> Vec<Token> {
    kinds
        .iter()
        .enumerate()
        .filter_map(|(i, &kind)| {
            let m = caps.get(i + 1)?;
            (!m.is_empty()).then(|| Token::new(kind, m.start(), m.end()))
        })
        .collect()
}

/// One token of `kind` covering the whole line. An empty line yields none.
pub fn whole_line(kind: TokenKind, line: &str) -> Vec<Token> {
    if line.is_empty() {
        Vec::new()
    } else {
        vec![Token::new(kind, 0, line.len())]
    }
}

/// Turn arbitrary tokens into a clean cover of `0..line_len`.
///
/// Tokens are sorted by start offset. Empty ones, ones reaching past the
/// line, and ones overlapping an earlier token are dropped. Uncovered bytes
/// become tokens of `gap`.
pub fn fill_gaps(mut tokens: Vec<Token>, line_len: usize, gap: TokenKind) -> Vec<Token> {
    tokens.sort_by_key(|t| (t.start(), t.end()));

    let mut out = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut pos = 0;
    for token in tokens {
        if token.is_empty() || token.end() > line_len || token.start() < pos {
            continue;
        }
        if token.start() > pos {
            out.push(Token::new(gap, pos, token.start()));
        }
        pos = token.end();
        out.push(token);
    }
    if pos < line_len {
        out.push(Token::new(gap, pos, line_len));
    }
    out
}

/// Whether `tokens` are ordered, non-empty, contiguous and cover `0..len`.
pub fn covers(tokens: &[Token], len: usize) -> bool {
    let mut pos = 0;
    for token in tokens {
        if token.is_empty() || token.start() != pos {
            return false;
        }
        pos = token.end();
    }
    pos == len
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_classify_captures_skips_empty_groups() {
        let re = Regex::new(r"^(\\end\{math\})(.*)$").unwrap();
        let caps = re.captures("\\end{math}").unwrap();
        let tokens = classify_captures(&caps, &[TokenKind::Tag, TokenKind::Comment]);
        assert_eq!(tokens, vec![Token::new(TokenKind::Tag, 0, 10)]);
    }

    #[test]
    fn test_classify_captures_in_order() {
        let re = Regex::new(r"^(a)(b*)(c)$").unwrap();
        let caps = re.captures("abbc").unwrap();
        let tokens = classify_captures(&caps, &[TokenKind::Tag, TokenKind::Plain, TokenKind::Tag]);
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Tag, 0, 1),
                Token::new(TokenKind::Plain, 1, 3),
                Token::new(TokenKind::Tag, 3, 4),
            ]
        );
    }

    #[test]
    fn test_whole_line() {
        assert_eq!(whole_line(TokenKind::Comment, "hi"), vec![Token::new(TokenKind::Comment, 0, 2)]);
        assert!(whole_line(TokenKind::Comment, "").is_empty());
    }

    #[test]
    fn test_fill_gaps() {
        let tokens = vec![
            Token::new(TokenKind::Keyword, 4, 6),
            Token::new(TokenKind::Keyword, 0, 2),
        ];
        let filled = fill_gaps(tokens, 8, TokenKind::Plain);
        assert_eq!(
            filled,
            vec![
                Token::new(TokenKind::Keyword, 0, 2),
                Token::new(TokenKind::Plain, 2, 4),
                Token::new(TokenKind::Keyword, 4, 6),
                Token::new(TokenKind::Plain, 6, 8),
            ]
        );
        assert!(covers(&filled, 8));
    }

    #[test]
    fn test_fill_gaps_drops_bad_tokens() {
        let tokens = vec![
            Token::new(TokenKind::String, 0, 4),
            Token::new(TokenKind::Number, 2, 3),
            Token::new(TokenKind::Number, 3, 3),
            Token::new(TokenKind::Type, 4, 99),
        ];
        let filled = fill_gaps(tokens, 5, TokenKind::Plain);
        assert_eq!(
            filled,
            vec![Token::new(TokenKind::String, 0, 4), Token::new(TokenKind::Plain, 4, 5)]
        );
    }

    #[test]
    fn test_fill_gaps_empty_line() {
        assert!(fill_gaps(Vec::new(), 0, TokenKind::Plain).is_empty());
    }

    #[test]
    fn test_covers() {
        assert!(covers(&[], 0));
        assert!(!covers(&[], 3));
        assert!(!covers(&[Token::new(TokenKind::Plain, 1, 3)], 3));
        assert!(covers(
            &[Token::new(TokenKind::Tag, 0, 1), Token::new(TokenKind::Plain, 1, 3)],
            3
        ));
    }
}
