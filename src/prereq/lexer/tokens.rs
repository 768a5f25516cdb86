//! Token definitions for prerequisite text
//!
//! Logos only splits the source into raw pieces: punctuation and words.
//! Whitespace (any Unicode whitespace) and sentence punctuation (`.` and `:`)
//! only separate tokens. The raw patterns never overlap, so no priorities are
//! involved. Deciding what a word means (operator keyword, course code, or
//! plain text) happens in the lexer driver, which produces [`Token`]s.
use crate::prereq::course_code::CourseCode;
use logos::Logos;
use std::fmt;

/// Raw pieces of a prerequisite description, as split by logos
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
#[logos(skip r"[.:]+")]
pub enum RawToken {
    #[token("&")]
    Ampersand,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Conjunctive list separators in catalog style
    #[token(",")]
    #[token(";")]
    Comma,

    // Everything else, one word at a time
    #[regex(r"[^\s(),;&.:]+")]
    Word,
}

/// All possible tokens in a prerequisite description
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Code(CourseCode),
    And,
    Or,
    LParen,
    RParen,
    Comma,
    Text(String),
}

/// Operator keyword a word stands for, if any. Case-insensitive.
pub fn keyword(word: &str) -> Option<Token> {
    if word.eq_ignore_ascii_case("and") {
        Some(Token::And)
    } else if word.eq_ignore_ascii_case("or") || word.eq_ignore_ascii_case("and/or") {
        Some(Token::Or)
    } else {
        None
    }
}

/// A department prefix: 1-4 letters that are not an operator keyword.
pub fn is_prefix(word: &str) -> bool {
    (1..=4).contains(&word.len())
        && word.chars().all(|c| c.is_ascii_alphabetic())
        && keyword(word).is_none()
}

/// A course number: 3-4 digits and an optional single letter suffix.
pub fn is_course_number(word: &str) -> bool {
    let digits = word.chars().take_while(|c| c.is_ascii_digit()).count();
    let rest = &word[digits..];
    (3..=4).contains(&digits)
        && rest.len() <= 1
        && rest.chars().all(|c| c.is_ascii_alphabetic())
}

impl Token {
    /// Check if this token is a logical operator or separator
    pub fn is_operator(&self) -> bool {
        matches!(self, Token::And | Token::Or | Token::Comma)
    }

    /// Check if this token can stand alone as a requirement leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, Token::Code(_) | Token::Text(_))
    }

    /// Short human description used in parse diagnostics
    pub fn describe(&self) -> String {
        match self {
            Token::Code(code) => format!("course code '{}'", code),
            Token::Text(text) => format!("text '{}'", text),
            other => format!("'{}'", other),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Code(code) => write!(f, "{}", code),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Text(text) => write!(f, "{}", text),
        }
    }
}
