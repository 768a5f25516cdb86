//! Academic level of a course and of a student

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::LevelConfig;
use crate::prereq::course_code::CourseCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcademicLevel {
    Undergraduate,
    Graduate,
}

/// The level a student is enrolled at. Same two values as a course level.
pub type StudentLevel = AcademicLevel;

impl AcademicLevel {
    /// Recognize a declared level label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "undergraduate" | "undergrad" | "ug" => Some(AcademicLevel::Undergraduate),
            "graduate" | "grad" => Some(AcademicLevel::Graduate),
            _ => None,
        }
    }

    /// Infer a course level from its number and its free text.
    ///
    /// Any indicator phrase found (case-insensitively) in one of `texts` makes
    /// the course graduate level, as does a number at or above the threshold.
    pub fn infer(code: &CourseCode, texts: &[&str], config: &LevelConfig) -> Self {
        if code.level_number() >= config.graduate_threshold {
            return AcademicLevel::Graduate;
        }

        let graduate_phrase = texts.iter().any(|text| {
            let text = text.to_lowercase();
            config
                .graduate_indicators
                .iter()
                .any(|indicator| text.contains(&indicator.to_lowercase()))
        });

        if graduate_phrase {
            AcademicLevel::Graduate
        } else {
            AcademicLevel::Undergraduate
        }
    }

    /// Whether a student at this level may see a course at `course` level.
    /// Graduate students may take everything.
    pub fn admits(self, course: AcademicLevel) -> bool {
        self == AcademicLevel::Graduate || course == AcademicLevel::Undergraduate
    }
}

impl FromStr for AcademicLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| format!("unknown level '{}' (expected 'undergraduate' or 'graduate')", s))
    }
}

impl fmt::Display for AcademicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcademicLevel::Undergraduate => f.write_str("undergraduate"),
            AcademicLevel::Graduate => f.write_str("graduate"),
        }
    }
}
