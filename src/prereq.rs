//! Prerequisite core
//!
//! Leaf to root: [course_code] normalizes identifiers, [lexer] turns raw text into
//! tokens, [parser] builds the expression tree, [evaluator] checks a tree against a
//! [completed] set, and [eligibility] folds that into a per-course verdict.
//! Every stage is a pure function of its input.

pub mod completed;
pub mod course_code;
pub mod eligibility;
pub mod evaluator;
pub mod lexer;
pub mod parser;

#[cfg(test)]
pub mod testing;

pub use completed::{CompletedCourses, LoadedCompleted};
pub use course_code::{normalize, CourseCode, NormalizationError};
pub use eligibility::{compute_eligibility, EligibilityResult, EligibilityStatus};
pub use evaluator::{evaluate, Evaluation};
pub use lexer::{tokenize, Token, TokenSpan};
pub use parser::{
    parse, parse_prerequisites, CommaPolicy, ParseError, ParseErrorReason, ParseOptions,
    PrerequisiteExpression, Requirement,
};
