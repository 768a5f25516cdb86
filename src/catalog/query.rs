//! Catalog queries
//!
//! Pure functions over an immutable [`Catalog`]: they borrow the catalog and
//! return new result sequences in catalog order.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::course::Course;
use crate::catalog::level::StudentLevel;
use crate::catalog::Catalog;
use crate::prereq::completed::CompletedCourses;
use crate::prereq::course_code::CourseCode;
use crate::prereq::eligibility::{compute_eligibility, EligibilityResult};
use crate::prereq::parser::ParseError;

/// Which courses a student is looking at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Exact major tag, or every major when `None`
    pub major: Option<String>,
    pub level: StudentLevel,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            major: None,
            level: StudentLevel::Undergraduate,
        }
    }
}

impl CatalogQuery {
    pub fn new(major: Option<String>, level: StudentLevel) -> Self {
        Self { major, level }
    }

    pub fn matches(&self, course: &Course) -> bool {
        let major_ok = self.major.as_deref().map_or(true, |major| course.has_major(major));
        major_ok && self.level.admits(course.level())
    }
}

/// Eligibility of every selected course, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EligibilityReport {
    pub results: Vec<EligibilityResult>,
}

impl EligibilityReport {
    /// Courses the student can take next
    pub fn eligible(&self) -> impl Iterator<Item = &EligibilityResult> {
        self.results.iter().filter(|result| result.is_eligible())
    }

    /// Parse errors keyed by course code
    pub fn diagnostics(&self) -> BTreeMap<&CourseCode, &ParseError> {
        self.results
            .iter()
            .filter_map(|result| result.parse_error.as_ref().map(|err| (&result.course, err)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Evaluate every course `query` selects against `completed`.
pub fn eligibility_report(
    catalog: &Catalog,
    query: &CatalogQuery,
    completed: &CompletedCourses,
) -> EligibilityReport {
    let results = catalog
        .select(query)
        .into_iter()
        .map(|course| compute_eligibility(course, completed))
        .collect();
    EligibilityReport { results }
}
