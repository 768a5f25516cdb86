//! Lexer module for prerequisite text
//!
//! This module contains the tokenization logic for catalog prerequisite
//! descriptions, including token definitions and the lexer implementation.
//!
//! Tokenization is total. Malformed source text still yields a well-formed token
//! stream; deciding whether that stream makes sense is the parser's job.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_kinds, TokenSpan};
pub use tokens::Token;
