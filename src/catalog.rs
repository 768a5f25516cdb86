//! Course catalog
//!
//! A [`Catalog`] is built once from raw records and never mutated afterwards.
//! Filtering, eligibility reports, statistics and the dependency graph are
//! pure functions that borrow it.

pub mod course;
pub mod graph;
pub mod level;
pub mod loader;
pub mod query;
pub mod stats;

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::LevelConfig;
use crate::prereq::course_code::{CourseCode, NormalizationError};
use crate::prereq::parser::ParseOptions;

pub use course::{extract_prerequisite_clause, Course, CourseRecord};
pub use graph::{DependencyGraph, GraphEdge, GraphNode};
pub use level::{AcademicLevel, StudentLevel};
pub use loader::{load_catalog, parse_records, CatalogError, CatalogFormat};
pub use query::{eligibility_report, CatalogQuery, EligibilityReport};
pub use stats::{CatalogStats, Progress};

/// A record left out of the catalog because its own code is malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the source sequence
    pub index: usize,
    pub error: NormalizationError,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<CourseCode, usize>,
    skipped: Vec<SkippedRecord>,
}

impl Catalog {
    /// Build a catalog from raw records. Records with a malformed code are
    /// skipped and remembered; every other record becomes a course.
    pub fn from_records(records: &[CourseRecord], levels: &LevelConfig, options: ParseOptions) -> Self {
        let mut courses = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match Course::from_record(record, levels, options) {
                Ok(course) => courses.push(course),
                Err(error) => {
                    warn!(index, "skipping catalog record: {}", error);
                    skipped.push(SkippedRecord { index, error });
                }
            }
        }

        let mut catalog = Self::from_courses(courses);
        catalog.skipped = skipped;
        catalog
    }

    /// Build a catalog from validated courses. Lookups by code resolve to the
    /// first course carrying it.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut index = HashMap::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if index.contains_key(course.code()) {
                warn!(course = %course.code(), "duplicate course code in catalog");
                continue;
            }
            index.insert(course.code().clone(), position);
        }
        debug!(courses = courses.len(), "catalog built");

        Self {
            courses,
            index,
            skipped: Vec::new(),
        }
    }

    /// Every course, in catalog order
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.index.get(code).map(|&position| &self.courses[position])
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses matching `query`, in catalog order.
    pub fn select(&self, query: &CatalogQuery) -> Vec<&Course> {
        self.courses.iter().filter(|course| query.matches(course)).collect()
    }
}
