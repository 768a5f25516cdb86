//! Prerequisite expression tree
//!
//! Built once per course from its token stream and only read afterwards.
//! `All` and `Any` always carry at least one child; the parser collapses a
//! single-child group into the child itself.

use crate::prereq::course_code::CourseCode;
use serde::Serialize;
use std::fmt;

/// A single leaf requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// A catalog course, checked against the completed set.
    Course(CourseCode),
    /// Free text such as `permission of instructor`; never satisfied automatically.
    Opaque(String),
}

impl Requirement {
    pub fn course_code(&self) -> Option<&CourseCode> {
        match self {
            Requirement::Course(code) => Some(code),
            Requirement::Opaque(_) => None,
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Requirement::Opaque(_))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Course(code) => write!(f, "{}", code),
            Requirement::Opaque(text) => write!(f, "{}", text),
        }
    }
}

/// Logical structure of a prerequisite description.
///
/// The parser never produces an empty `All` or `Any`, and it collapses
/// single-child groups. Hand-built trees may still contain empty groups;
/// [`evaluate`](crate::prereq::evaluate) treats them like `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteExpression {
    Requirement(Requirement),
    /// Every child must hold.
    All(Vec<PrerequisiteExpression>),
    /// At least one child must hold.
    Any(Vec<PrerequisiteExpression>),
    /// No prerequisites at all.
    None,
}

impl PrerequisiteExpression {
    pub fn course(code: CourseCode) -> Self {
        PrerequisiteExpression::Requirement(Requirement::Course(code))
    }

    pub fn opaque(text: impl Into<String>) -> Self {
        PrerequisiteExpression::Requirement(Requirement::Opaque(text.into()))
    }

    /// Conjunction of `first` and `rest`, or `first` alone when `rest` is empty.
    pub fn all_of(first: Self, rest: Vec<Self>) -> Self {
        if rest.is_empty() {
            first
        } else {
            let mut children = Vec::with_capacity(rest.len() + 1);
            children.push(first);
            children.extend(rest);
            PrerequisiteExpression::All(children)
        }
    }

    /// Disjunction of `first` and `rest`, or `first` alone when `rest` is empty.
    pub fn any_of(first: Self, rest: Vec<Self>) -> Self {
        if rest.is_empty() {
            first
        } else {
            let mut children = Vec::with_capacity(rest.len() + 1);
            children.push(first);
            children.extend(rest);
            PrerequisiteExpression::Any(children)
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PrerequisiteExpression::None)
    }

    fn is_group(&self) -> bool {
        matches!(
            self,
            PrerequisiteExpression::All(_) | PrerequisiteExpression::Any(_)
        )
    }

    /// All leaf requirements, left to right.
    pub fn requirements(&self) -> Vec<&Requirement> {
        let mut leaves = Vec::new();
        self.collect_requirements(&mut leaves);
        leaves
    }

    fn collect_requirements<'a>(&'a self, leaves: &mut Vec<&'a Requirement>) {
        match self {
            PrerequisiteExpression::Requirement(requirement) => leaves.push(requirement),
            PrerequisiteExpression::All(children) | PrerequisiteExpression::Any(children) => {
                for child in children {
                    child.collect_requirements(leaves);
                }
            }
            PrerequisiteExpression::None => {}
        }
    }

    /// Course-code leaves, left to right, duplicates kept.
    pub fn course_codes(&self) -> Vec<&CourseCode> {
        self.requirements()
            .into_iter()
            .filter_map(Requirement::course_code)
            .collect()
    }

    /// Nesting depth; a leaf or `None` has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            PrerequisiteExpression::All(children) | PrerequisiteExpression::Any(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[PrerequisiteExpression],
    separator: &str,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if child.is_group() {
            write!(f, "({})", child)?;
        } else {
            write!(f, "{}", child)?;
        }
    }
    Ok(())
}

/// Renders in the grammar's own notation; nested groups are always parenthesized,
/// so the output parses back to the same tree.
impl fmt::Display for PrerequisiteExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrerequisiteExpression::Requirement(requirement) => write!(f, "{}", requirement),
            PrerequisiteExpression::All(children) => write_joined(f, children, " and "),
            PrerequisiteExpression::Any(children) => write_joined(f, children, " or "),
            PrerequisiteExpression::None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prereq::testing::{course, opaque};

    #[test]
    fn test_all_of_collapses_single_child() {
        let expr = PrerequisiteExpression::all_of(course("EEL 3801C"), vec![]);
        assert_eq!(expr, course("EEL 3801C"));
    }

    #[test]
    fn test_any_of_keeps_order() {
        let expr =
            PrerequisiteExpression::any_of(course("EEL 3801C"), vec![course("EEE 3342C")]);
        assert_eq!(
            expr,
            PrerequisiteExpression::Any(vec![course("EEL 3801C"), course("EEE 3342C")])
        );
    }

    #[test]
    fn test_display_parenthesizes_groups() {
        let expr = PrerequisiteExpression::All(vec![
            PrerequisiteExpression::Any(vec![course("EEL 3801C"), course("EEE 3342C")]),
            course("MAC 2311"),
        ]);
        insta::assert_snapshot!(expr.to_string(), @"(EEL 3801C or EEE 3342C) and MAC 2311");
    }

    #[test]
    fn test_requirements_walk_left_to_right() {
        let expr = PrerequisiteExpression::Any(vec![
            course("EEL 4750"),
            PrerequisiteExpression::All(vec![opaque("senior standing"), course("EEL 3657")]),
        ]);
        let leaves: Vec<String> = expr.requirements().iter().map(|r| r.to_string()).collect();
        assert_eq!(leaves, vec!["EEL 4750", "senior standing", "EEL 3657"]);
        assert_eq!(expr.course_codes().len(), 2);
        assert_eq!(expr.depth(), 3);
    }

    #[test]
    fn test_none_has_no_requirements() {
        assert!(PrerequisiteExpression::None.requirements().is_empty());
        assert!(PrerequisiteExpression::None.is_none());
    }

    #[test]
    fn test_serializes_tagged() {
        let expr = PrerequisiteExpression::Any(vec![course("EEL 4750"), opaque("consent")]);
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"any": [
                {"requirement": {"course": "EEL 4750"}},
                {"requirement": {"opaque": "consent"}}
            ]})
        );
    }
}
