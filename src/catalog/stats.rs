//! Catalog statistics

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::course::Course;
use crate::catalog::level::AcademicLevel;
use crate::catalog::query::EligibilityReport;
use crate::prereq::eligibility::EligibilityStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub undergraduate: usize,
    pub graduate: usize,
    pub by_major: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
}

/// Student progress over the same selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub eligible: usize,
    pub needs_prerequisites: usize,
    pub unparsed: usize,
}

impl Progress {
    pub fn from_report(report: &EligibilityReport) -> Self {
        let mut progress = Progress::default();
        for result in &report.results {
            match result.status {
                EligibilityStatus::Completed => progress.completed += 1,
                EligibilityStatus::Eligible => progress.eligible += 1,
                EligibilityStatus::NeedsPrerequisites => progress.needs_prerequisites += 1,
                EligibilityStatus::Unparsed => progress.unparsed += 1,
            }
        }
        progress
    }
}

impl CatalogStats {
    /// Count a course selection. `report` adds progress figures when given.
    pub fn compute(courses: &[&Course], report: Option<&EligibilityReport>) -> Self {
        let mut stats = CatalogStats {
            total: courses.len(),
            progress: report.map(Progress::from_report),
            ..Default::default()
        };

        for course in courses {
            match course.level() {
                AcademicLevel::Undergraduate => stats.undergraduate += 1,
                AcademicLevel::Graduate => stats.graduate += 1,
            }
            for major in course.majors() {
                *stats.by_major.entry(major.clone()).or_insert(0) += 1;
            }
        }

        stats
    }
}
