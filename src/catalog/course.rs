//! Catalog records and courses
//!
//! A [`CourseRecord`] is what the extraction layer hands over: loosely typed
//! strings straight from the source document. A [`Course`] is the validated
//! form with a normalized code, a resolved level and a prerequisite expression
//! that is parsed exactly once, when the course is built.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::catalog::level::AcademicLevel;
use crate::config::LevelConfig;
use crate::prereq::course_code::{CourseCode, NormalizationError};
use crate::prereq::parser::{parse_prerequisites, ParseError, ParseOptions, PrerequisiteExpression};

static PREREQUISITE_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:PR|Prerequisite\(s\)|Prerequisites?)\s*:\s*([^.]*)")
        .expect("prerequisite clause pattern is valid")
});

/// One raw catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(alias = "course_code")]
    pub code: String,
    #[serde(default)]
    pub title: String,
    /// Declared level; empty or unrecognized means "infer it"
    #[serde(default)]
    pub level: String,
    #[serde(default, deserialize_with = "deserialize_majors")]
    pub majors: Vec<String>,
    /// Prerequisite text; when absent it is extracted from the description
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default, alias = "full_description")]
    pub description: String,
}

/// Majors come either as a list or as one comma-separated string.
fn deserialize_majors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Majors {
        List(Vec<String>),
        Joined(String),
    }

    let majors = match Majors::deserialize(deserializer)? {
        Majors::List(list) => list,
        Majors::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };

    Ok(majors
        .into_iter()
        .map(|major| major.trim().to_string())
        .filter(|major| !major.is_empty())
        .collect())
}

/// Find the prerequisite clause of a course description: the text after the
/// first `PR:`, `Prerequisite(s):` or `Prerequisites:` marker, up to the next period.
pub fn extract_prerequisite_clause(description: &str) -> Option<&str> {
    PREREQUISITE_CLAUSE
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|clause| clause.as_str().trim())
}

impl CourseRecord {
    /// The prerequisite text this record describes, explicit or extracted.
    pub fn prerequisite_text(&self) -> &str {
        match &self.prerequisites {
            Some(text) => text.trim(),
            None => extract_prerequisite_clause(&self.description).unwrap_or(""),
        }
    }
}

/// A validated catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    code: CourseCode,
    title: String,
    level: AcademicLevel,
    majors: Vec<String>,
    prerequisite_text: String,
    expression: PrerequisiteExpression,
    parse_error: Option<ParseError>,
}

impl Course {
    /// Build a course, parsing its prerequisite text. A parse failure leaves the
    /// expression at `None` and keeps the error for display.
    pub fn new(
        code: CourseCode,
        title: impl Into<String>,
        level: AcademicLevel,
        majors: Vec<String>,
        prerequisite_text: impl Into<String>,
        options: ParseOptions,
    ) -> Self {
        let prerequisite_text = prerequisite_text.into();
        let (expression, parse_error) = match parse_prerequisites(&prerequisite_text, options) {
            Ok(expression) => (expression, None),
            Err(err) => {
                warn!(course = %code, text = %prerequisite_text, "{}", err);
                (PrerequisiteExpression::None, Some(err))
            }
        };

        Self {
            code,
            title: title.into(),
            level,
            majors,
            prerequisite_text,
            expression,
            parse_error,
        }
    }

    /// Validate a raw record. Only the record's own code can make this fail.
    pub fn from_record(
        record: &CourseRecord,
        levels: &LevelConfig,
        options: ParseOptions,
    ) -> Result<Self, NormalizationError> {
        let code = CourseCode::parse(&record.code)?;
        let prerequisite_text = record.prerequisite_text();
        let level = AcademicLevel::from_label(&record.level).unwrap_or_else(|| {
            AcademicLevel::infer(&code, &[prerequisite_text, &record.description], levels)
        });

        Ok(Self::new(
            code,
            record.title.trim(),
            level,
            record.majors.clone(),
            prerequisite_text,
            options,
        ))
    }

    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> AcademicLevel {
        self.level
    }

    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    pub fn has_major(&self, major: &str) -> bool {
        self.majors.iter().any(|m| m == major)
    }

    /// Raw prerequisite text, as found in the record
    pub fn prerequisite_text(&self) -> &str {
        &self.prerequisite_text
    }

    pub fn expression(&self) -> &PrerequisiteExpression {
        &self.expression
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }
}
