//! Parser combinators for the prerequisite grammar.
//!
//! ```text
//! expr    := or_expr
//! or_expr := and_expr (OR and_expr)*
//! and_expr:= term ((AND | COMMA) term)*
//! term    := CODE | TEXT | '(' expr ')'
//! ```
//!
//! AND binds tighter than OR, so `A or B and C` reads as `A or (B and C)`.
//! Where a bare comma binds is decided by [`CommaPolicy`]. A comma directly in
//! front of an explicit operator (`A, B, and C`) is absorbed by that operator.

use chumsky::error::Error as _;
use chumsky::prelude::*;

use crate::prereq::lexer::{Token, TokenSpan};
use crate::prereq::parser::ast::PrerequisiteExpression;
use crate::prereq::parser::{CommaPolicy, ParseOptions};

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, ignoring the span
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// An explicit operator, optionally preceded by a comma, or a bare comma when
/// the policy assigns commas to this level.
fn operator(op: Token, bare_comma: bool) -> BoxedParser<'static, TokenSpan, (), ParserError> {
    let explicit = token(Token::Comma).or_not().ignore_then(token(op));
    if bare_comma {
        explicit.or(token(Token::Comma)).boxed()
    } else {
        explicit.boxed()
    }
}

/// A course code or opaque text leaf
fn leaf() -> impl Parser<TokenSpan, PrerequisiteExpression, Error = ParserError> + Clone {
    filter_map(|span, (token, range): TokenSpan| match token {
        Token::Code(code) => Ok(PrerequisiteExpression::course(code)),
        Token::Text(text) => Ok(PrerequisiteExpression::opaque(text)),
        other => Err(Simple::expected_input_found(
            span,
            Vec::new(),
            Some((other, range)),
        )),
    })
}

/// Parse a full expression (without requiring end of input)
pub(crate) fn expression(
    options: ParseOptions,
) -> impl Parser<TokenSpan, PrerequisiteExpression, Error = ParserError> + Clone {
    recursive(move |expr| {
        let group = expr.delimited_by(token(Token::LParen), token(Token::RParen));
        let term = leaf().or(group);

        let and_expr = term
            .clone()
            .then(
                operator(Token::And, options.comma == CommaPolicy::And)
                    .ignore_then(term)
                    .repeated(),
            )
            .map(|(first, rest)| PrerequisiteExpression::all_of(first, rest));

        and_expr
            .clone()
            .then(
                operator(Token::Or, options.comma == CommaPolicy::Or)
                    .ignore_then(and_expr)
                    .repeated(),
            )
            .map(|(first, rest)| PrerequisiteExpression::any_of(first, rest))
    })
}

/// Parse a complete prerequisite description; trailing tokens are an error
pub(crate) fn prerequisites(
    options: ParseOptions,
) -> impl Parser<TokenSpan, PrerequisiteExpression, Error = ParserError> + Clone {
    expression(options).then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prereq::lexer::tokenize;
    use crate::prereq::testing::course;

    #[test]
    fn test_operator_accepts_oxford_comma() {
        let tokens = tokenize(", and");
        assert!(operator(Token::And, false).then_ignore(end()).parse(tokens).is_ok());
    }

    #[test]
    fn test_bare_comma_depends_on_policy() {
        let tokens = tokenize(",");
        assert!(operator(Token::And, true).parse(tokens.clone()).is_ok());
        assert!(operator(Token::And, false).parse(tokens).is_err());
    }

    #[test]
    fn test_leaf_rejects_operators() {
        assert!(leaf().parse(tokenize("and")).is_err());
        assert_eq!(leaf().parse(tokenize("EEL 4750")).unwrap(), course("EEL 4750"));
    }

    #[test]
    fn test_expression_stops_before_trailing_tokens() {
        let parsed = expression(ParseOptions::default()).parse(tokenize("EEL 4750 )"));
        assert_eq!(parsed.unwrap(), course("EEL 4750"));
    }
}
