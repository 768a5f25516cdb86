//! Implementation of the prerequisite lexer
//!
//! Logos splits the text into raw words and punctuation. This module drives it
//! and decides what each word is:
//!
//! - `and`, `or`, `and/or` (any case) are operators;
//! - a prefix word followed, across whitespace only, by a course number joins
//!   into one course code (`EEL 3801C`, `EEL\n3801C`), as does a single word
//!   that already is one (`eel3801c`);
//! - a bare course number right after `<code> <operator>` borrows that code's
//!   prefix (`MAC 2311 or 2312`);
//! - anything else is text, and adjacent text folds into a single
//!   [`Token::Text`], so `permission of instructor` reaches the parser as one
//!   requirement.

use crate::prereq::course_code::CourseCode;
use crate::prereq::lexer::tokens::{is_course_number, is_prefix, keyword, RawToken, Token};
use logos::Logos;
use std::ops::Range;

/// Token paired with its byte range in the source text
pub type TokenSpan = (Token, Range<usize>);

type RawSpan = (RawToken, Range<usize>);

/// Tokenize prerequisite text. Never fails: input logos cannot classify becomes text.
pub fn tokenize(source: &str) -> Vec<TokenSpan> {
    let raw: Vec<RawSpan> = RawToken::lexer(source)
        .spanned()
        .map(|(result, span)| (result.unwrap_or(RawToken::Word), span))
        .collect();

    let mut tokens: Vec<TokenSpan> = Vec::new();
    let mut i = 0;
    while i < raw.len() {
        let (kind, span) = (raw[i].0, raw[i].1.clone());
        i += 1;

        let (token, span) = match kind {
            RawToken::Ampersand => (Token::And, span),
            RawToken::LParen => (Token::LParen, span),
            RawToken::RParen => (Token::RParen, span),
            RawToken::Comma => (Token::Comma, span),
            RawToken::Word => {
                let word = source[span.clone()].trim();
                if word.is_empty() {
                    continue;
                }
                match split_code(source, word, &span, raw.get(i)) {
                    Some((code, end)) => {
                        i += 1;
                        (Token::Code(code), span.start..end)
                    }
                    None => (classify_word(word, &tokens), span),
                }
            }
        };
        push(&mut tokens, token, span);
    }

    tokens
}

/// A prefix word followed by a course number word, with only whitespace between.
/// Returns the code and the end of the number.
fn split_code(
    source: &str,
    word: &str,
    span: &Range<usize>,
    next: Option<&RawSpan>,
) -> Option<(CourseCode, usize)> {
    let next_span = match next? {
        (RawToken::Word, next_span) => next_span,
        _ => return None,
    };
    let number = &source[next_span.clone()];
    let gap = &source[span.end..next_span.start];

    if !is_prefix(word) || !is_course_number(number) || !gap.chars().all(char::is_whitespace) {
        return None;
    }
    CourseCode::parse(&source[span.start..next_span.end])
        .ok()
        .map(|code| (code, next_span.end))
}

fn classify_word(word: &str, previous: &[TokenSpan]) -> Token {
    if let Some(op) = keyword(word) {
        return op;
    }
    if let Ok(code) = CourseCode::parse(word) {
        if is_prefix(code.prefix()) {
            return Token::Code(code);
        }
    }
    if is_course_number(word) {
        if let [.., (Token::Code(code), _), (op, _)] = previous {
            if op.is_operator() {
                if let Ok(code) = CourseCode::parse(&format!("{}{}", code.prefix(), word)) {
                    return Token::Code(code);
                }
            }
        }
    }
    Token::Text(word.to_string())
}

/// Append a token, folding text into a preceding text token.
fn push(tokens: &mut Vec<TokenSpan>, token: Token, span: Range<usize>) {
    if let Token::Text(word) = &token {
        if let Some((Token::Text(text), previous)) = tokens.last_mut() {
            text.push(' ');
            text.push_str(word);
            previous.end = span.end;
            return;
        }
    }
    tokens.push((token, span));
}

/// Tokenize and drop the spans
pub fn tokenize_kinds(source: &str) -> Vec<Token> {
    tokenize(source).into_iter().map(|(token, _)| token).collect()
}
