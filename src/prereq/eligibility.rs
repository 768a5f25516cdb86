//! Eligibility engine
//!
//! Combines the evaluator's verdict for one course with the facts the catalog
//! knows about it. "Already completed" and "prerequisites satisfied" are
//! reported independently. A course whose prerequisite text failed to parse is
//! never reported as satisfied.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::Course;
use crate::prereq::completed::CompletedCourses;
use crate::prereq::course_code::CourseCode;
use crate::prereq::evaluator::evaluate;
use crate::prereq::parser::{ParseError, Requirement};

/// Summary status for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Completed,
    Eligible,
    NeedsPrerequisites,
    Unparsed,
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EligibilityStatus::Completed => "completed",
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::NeedsPrerequisites => "needs prerequisites",
            EligibilityStatus::Unparsed => "could not parse",
        };
        f.write_str(label)
    }
}

/// Per-course verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub course: CourseCode,
    pub title: String,
    pub satisfied: bool,
    pub missing: BTreeSet<Requirement>,
    pub already_completed: bool,
    /// Raw prerequisite text, kept for display next to a parse failure
    pub prerequisites: String,
    pub parse_error: Option<ParseError>,
    pub status: EligibilityStatus,
}

impl EligibilityResult {
    /// Prerequisites met and not taken yet
    pub fn is_eligible(&self) -> bool {
        self.satisfied && !self.already_completed
    }
}

/// Compute the eligibility of one course for one completed set
pub fn compute_eligibility(course: &Course, completed: &CompletedCourses) -> EligibilityResult {
    let already_completed = completed.contains(course.code());
    let evaluation = evaluate(course.expression(), completed);
    let parse_error = course.parse_error().cloned();
    let satisfied = evaluation.satisfied && parse_error.is_none();

    let status = if already_completed {
        EligibilityStatus::Completed
    } else if parse_error.is_some() {
        EligibilityStatus::Unparsed
    } else if satisfied {
        EligibilityStatus::Eligible
    } else {
        EligibilityStatus::NeedsPrerequisites
    };

    EligibilityResult {
        course: course.code().clone(),
        title: course.title().to_string(),
        satisfied,
        missing: evaluation.missing,
        already_completed,
        prerequisites: course.prerequisite_text().to_string(),
        parse_error,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AcademicLevel, Course};
    use crate::prereq::parser::ParseOptions;
    use crate::prereq::testing::{completed, requirement};

    fn course(code: &str, prerequisites: &str) -> Course {
        Course::new(
            crate::prereq::testing::code(code),
            "Test Course",
            AcademicLevel::Undergraduate,
            vec!["CpE".to_string()],
            prerequisites,
            ParseOptions::default(),
        )
    }

    #[test]
    fn test_no_prerequisites_is_eligible() {
        let result = compute_eligibility(&course("EEL 4768", ""), &completed(&[]));
        assert!(result.satisfied);
        assert!(result.is_eligible());
        assert_eq!(result.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn test_missing_prerequisites_are_listed() {
        let c = course("EEL 4783", "EEL 3801C and EEE 3342C");
        let result = compute_eligibility(&c, &completed(&["EEL 3801C"]));
        assert!(!result.satisfied);
        assert_eq!(result.missing, BTreeSet::from([requirement("EEE 3342C")]));
        assert_eq!(result.status, EligibilityStatus::NeedsPrerequisites);
    }

    #[test]
    fn test_already_completed_is_independent_of_prerequisites() {
        let c = course("EEL 4783", "EEL 3801C and EEE 3342C");
        let result = compute_eligibility(&c, &completed(&["EEL 4783"]));
        assert!(result.already_completed);
        assert!(!result.satisfied);
        assert!(!result.is_eligible());
        assert_eq!(result.status, EligibilityStatus::Completed);

        let result = compute_eligibility(&c, &completed(&["EEL 4783", "EEL 3801C", "EEE 3342C"]));
        assert!(result.already_completed);
        assert!(result.satisfied);
        assert!(!result.is_eligible());
    }

    #[test]
    fn test_parse_failure_is_never_satisfied() {
        let c = course("EEL 5513", "(EEL 4750 or EEL 3657");
        let result = compute_eligibility(&c, &completed(&["EEL 4750", "EEL 3657"]));
        assert!(!result.satisfied);
        assert!(!result.is_eligible());
        assert!(result.parse_error.is_some());
        assert_eq!(result.prerequisites, "(EEL 4750 or EEL 3657");
        assert_eq!(result.status, EligibilityStatus::Unparsed);
        assert_eq!(result.status.to_string(), "could not parse");
    }

    #[test]
    fn test_opaque_requirement_always_missing() {
        let c = course("EEL 4914", "EEL 4750 and consent of instructor");
        let result = compute_eligibility(&c, &completed(&["EEL 4750"]));
        assert!(!result.satisfied);
        assert_eq!(
            result.missing,
            BTreeSet::from([Requirement::Opaque("consent of instructor".to_string())])
        );
    }
}
