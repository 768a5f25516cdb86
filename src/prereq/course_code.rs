//! Course code normalizer
//!
//! A course code is a department prefix of 1-4 letters followed by a 3-4 digit
//! number and an optional single letter suffix (lab / C-section marker):
//! `EEL 3123C`, `eel3123c` and `EEL   3123C` all name the same course.
//!
//! The canonical form upper-cases the prefix and the suffix and puts exactly one
//! space between prefix and number. Codes are compared only through that form;
//! there is no partial or fuzzy matching.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static COURSE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{1,4})\s*([0-9]{3,4})([A-Za-z]?)$").expect("course code pattern is valid")
});

/// Raised when a piece of text does not have the shape of a course code.
///
/// Never fatal. Prerequisite text keeps such words as opaque requirements and
/// completed-course loading skips the entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a course code: {input:?}")]
pub struct NormalizationError {
    pub input: String,
}

/// A normalized course identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode {
    prefix: String,
    number: String,
}

impl CourseCode {
    /// Normalize raw text into a course code.
    pub fn parse(raw: &str) -> Result<Self, NormalizationError> {
        let trimmed = raw.trim();
        let caps = COURSE_CODE.captures(trimmed).ok_or_else(|| NormalizationError {
            input: raw.to_string(),
        })?;

        let prefix = caps[1].to_ascii_uppercase();
        let number = format!("{}{}", &caps[2], caps[3].to_ascii_uppercase());
        Ok(Self { prefix, number })
    }

    /// Department prefix, e.g. `EEL`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number including the suffix letter, e.g. `3123C`.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Numeric part only, e.g. `3123` for `EEL 3123C`.
    pub fn level_number(&self) -> u32 {
        self.number
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .unwrap_or(0)
    }
}

/// Free-function form of [`CourseCode::parse`].
pub fn normalize(raw: &str) -> Result<CourseCode, NormalizationError> {
    CourseCode::parse(raw)
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.prefix, self.number)
    }
}

impl FromStr for CourseCode {
    type Err = NormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CourseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CourseCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}
