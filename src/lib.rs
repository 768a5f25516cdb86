//! # grove
//!
//! Decides which catalog courses a student may take, given free-text
//! prerequisite descriptions such as `EEL 3801C and (EEE 3342C or EEE 3307C)`.
//!
//! The pipeline runs one direction only:
//!
//! raw text -> tokens -> expression tree (cached on the course) -> evaluation -> verdict
//!
//! - [prereq] holds the core: course-code normalizer, lexer, parser, evaluator and
//!   eligibility engine.
//! - [catalog] holds the immutable course catalog and the pure queries over it.
//! - [config] loads layered settings (embedded defaults, user file, overrides).

pub mod catalog;
pub mod config;
pub mod prereq;
