//! Parser module for prerequisite expressions
//!
//! This module turns a token stream into a [`PrerequisiteExpression`]. An empty
//! stream means "no prerequisites" and parses to [`PrerequisiteExpression::None`].
//! Anything malformed (unbalanced parentheses, an operator with nothing after it,
//! tokens left over after a complete expression) fails with a [`ParseError`];
//! there is no recovery.

pub mod ast;
pub mod error;
pub mod grammar;

use chumsky::Parser;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::prereq::lexer::{tokenize, TokenSpan};

pub use ast::{PrerequisiteExpression, Requirement};
pub use error::{ParseError, ParseErrorReason};

/// Where a bare comma binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommaPolicy {
    /// `A, B or C` reads as `(A and B) or C`
    #[default]
    And,
    /// `A, B or C` reads as `A or B or C`
    Or,
}

impl FromStr for CommaPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" => Ok(CommaPolicy::And),
            "or" => Ok(CommaPolicy::Or),
            other => Err(format!("unknown comma policy '{}' (expected 'and' or 'or')", other)),
        }
    }
}

impl fmt::Display for CommaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommaPolicy::And => f.write_str("and"),
            CommaPolicy::Or => f.write_str("or"),
        }
    }
}

/// Knobs for the prerequisite grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub comma: CommaPolicy,
}

impl ParseOptions {
    pub fn with_comma(comma: CommaPolicy) -> Self {
        Self { comma }
    }
}

/// Parse an already tokenized description. `source_len` is the byte length of
/// the text the tokens came from; errors at end of input point there.
pub fn parse(
    tokens: &[TokenSpan],
    source_len: usize,
    options: ParseOptions,
) -> Result<PrerequisiteExpression, ParseError> {
    if tokens.is_empty() {
        return Ok(PrerequisiteExpression::None);
    }

    grammar::prerequisites(options)
        .parse(tokens.to_vec())
        .map_err(|errors| ParseError::from_simple(&errors, tokens, source_len))
}

/// Main parser function: tokenize and parse prerequisite text
pub fn parse_prerequisites(
    text: &str,
    options: ParseOptions,
) -> Result<PrerequisiteExpression, ParseError> {
    let tokens = tokenize(text);
    debug!(tokens = tokens.len(), text, "parsing prerequisites");
    parse(&tokens, text.len(), options)
}
