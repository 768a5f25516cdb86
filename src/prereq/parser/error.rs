//! Parse diagnostics
//!
//! Chumsky reports the furthest point it reached together with the token it
//! found there. That is translated into a byte offset in the prerequisite text
//! and one of a handful of reasons a catalog editor can act on.

use crate::prereq::lexer::{Token, TokenSpan};
use chumsky::error::Simple;
use serde::Serialize;
use thiserror::Error;

/// Why a prerequisite description could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ParseErrorReason {
    #[error("unclosed '('")]
    UnclosedParen,
    #[error("unmatched ')'")]
    UnmatchedCloseParen,
    #[error("empty parentheses")]
    EmptyGroup,
    #[error("'{0}' is not followed by a requirement")]
    DanglingOperator(String),
    #[error("unexpected {0}")]
    UnexpectedToken(String),
}

/// A failed parse. `position` is a byte offset into the prerequisite text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("could not parse prerequisites at offset {position}: {reason}")]
pub struct ParseError {
    pub position: usize,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub fn new(position: usize, reason: ParseErrorReason) -> Self {
        Self { position, reason }
    }

    /// Pick the furthest chumsky error and classify it against the token stream.
    pub(crate) fn from_simple(
        errors: &[Simple<TokenSpan>],
        tokens: &[TokenSpan],
        source_len: usize,
    ) -> Self {
        let Some(error) = errors.iter().max_by_key(|e| e.span().start) else {
            return Self::new(
                source_len,
                ParseErrorReason::UnexpectedToken("end of input".to_string()),
            );
        };

        let index = error.span().start.min(tokens.len());
        let offset_of = |i: usize| tokens.get(i).map_or(source_len, |(_, range)| range.start);
        let previous = index
            .checked_sub(1)
            .and_then(|i| tokens.get(i))
            .map(|(token, _)| token);
        let unclosed = unclosed_parens(&tokens[..index]);

        match (error.found().map(|(token, _)| token), previous) {
            (None, Some(op)) if op.is_operator() => Self::new(
                offset_of(index - 1),
                ParseErrorReason::DanglingOperator(op.to_string()),
            ),
            (None, _) => match unclosed.last() {
                Some(&open) => Self::new(offset_of(open), ParseErrorReason::UnclosedParen),
                None => Self::new(
                    source_len,
                    ParseErrorReason::UnexpectedToken("end of input".to_string()),
                ),
            },
            (Some(Token::RParen), Some(Token::LParen)) => {
                Self::new(offset_of(index - 1), ParseErrorReason::EmptyGroup)
            }
            (Some(Token::RParen), Some(op)) if op.is_operator() => Self::new(
                offset_of(index - 1),
                ParseErrorReason::DanglingOperator(op.to_string()),
            ),
            (Some(Token::RParen), _) if unclosed.is_empty() => {
                Self::new(offset_of(index), ParseErrorReason::UnmatchedCloseParen)
            }
            (Some(found), Some(op)) if found.is_operator() && op.is_operator() => Self::new(
                offset_of(index - 1),
                ParseErrorReason::DanglingOperator(op.to_string()),
            ),
            // An operator after a complete term only fails when nothing usable follows it
            (Some(found), Some(before)) if found.is_operator() && before != &Token::LParen => {
                Self::new(
                    offset_of(index),
                    ParseErrorReason::DanglingOperator(found.to_string()),
                )
            }
            (Some(found), _) => Self::new(
                offset_of(index),
                ParseErrorReason::UnexpectedToken(found.describe()),
            ),
        }
    }
}

/// Token indices of the parentheses still open at the end of `tokens`.
fn unclosed_parens(tokens: &[TokenSpan]) -> Vec<usize> {
    let mut open = Vec::new();
    for (i, (token, _)) in tokens.iter().enumerate() {
        match token {
            Token::LParen => open.push(i),
            Token::RParen => {
                open.pop();
            }
            _ => {}
        }
    }
    open
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offset_and_reason() {
        let err = ParseError::new(4, ParseErrorReason::DanglingOperator("and".to_string()));
        assert_eq!(
            err.to_string(),
            "could not parse prerequisites at offset 4: 'and' is not followed by a requirement"
        );
    }

    #[test]
    fn test_unclosed_parens_tracks_nesting() {
        let tokens = crate::prereq::lexer::tokenize("((EEL 3801C) or (EEE 3342C");
        assert_eq!(unclosed_parens(&tokens), vec![0, 5]);
    }

    #[test]
    fn test_serializes_reason_kind() {
        let err = ParseError::new(0, ParseErrorReason::UnclosedParen);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["reason"]["kind"], "unclosed_paren");
        assert_eq!(json["position"], 0);
    }
}
