//! Completed-course sets
//!
//! The caller owns the set; evaluation only reads it. Text input is either one
//! course per line or comma-separated entries (both may be mixed). Entries that
//! do not normalize are skipped and returned to the caller, never fatal.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::prereq::course_code::{CourseCode, NormalizationError};

/// Default marker for comment lines in completed-course files
pub const DEFAULT_COMMENT_PREFIX: &str = "#";

/// Normalized codes of the courses a student has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletedCourses {
    codes: BTreeSet<CourseCode>,
}

/// Result of loading completed courses from text
#[derive(Debug, Clone, Default)]
pub struct LoadedCompleted {
    pub courses: CompletedCourses,
    pub skipped: Vec<NormalizationError>,
}

impl CompletedCourses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.codes.contains(code)
    }

    /// Returns `false` when the code was already present.
    pub fn insert(&mut self, code: CourseCode) -> bool {
        self.codes.insert(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.codes.iter()
    }

    /// Parse completed-course text. Blank lines and lines starting with
    /// `comment_prefix` are ignored.
    pub fn parse(text: &str, comment_prefix: &str) -> LoadedCompleted {
        let mut loaded = LoadedCompleted::default();

        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| comment_prefix.is_empty() || !line.starts_with(comment_prefix))
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|entry| !entry.is_empty());

        for entry in entries {
            match CourseCode::parse(entry) {
                Ok(code) => {
                    if !loaded.courses.insert(code) {
                        debug!(entry, "duplicate completed course");
                    }
                }
                Err(err) => {
                    warn!(entry, "skipping completed course entry: {}", err);
                    loaded.skipped.push(err);
                }
            }
        }

        loaded
    }

    /// Read and parse a completed-course file
    pub fn from_path(path: impl AsRef<Path>, comment_prefix: &str) -> io::Result<LoadedCompleted> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&text, comment_prefix))
    }
}

impl FromIterator<CourseCode> for CompletedCourses {
    fn from_iter<T: IntoIterator<Item = CourseCode>>(iter: T) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompletedCourses {
    type Item = &'a CourseCode;
    type IntoIter = std::collections::btree_set::Iter<'a, CourseCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
