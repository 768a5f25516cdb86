//! Expression evaluator
//!
//! A pure walk over a [`PrerequisiteExpression`]. `All` collects every unmet
//! requirement instead of stopping at the first one, `Any` reports every failed
//! alternative unless one branch already holds. Opaque requirements can never
//! be verified here, so they are always unmet and always reported. An empty
//! group, which only hand-built trees can contain, imposes nothing and is
//! satisfied like [`PrerequisiteExpression::None`].

use serde::Serialize;
use std::collections::BTreeSet;

use crate::prereq::completed::CompletedCourses;
use crate::prereq::parser::{PrerequisiteExpression, Requirement};

/// Outcome of evaluating one expression against one completed set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Evaluation {
    pub satisfied: bool,
    pub missing: BTreeSet<Requirement>,
}

impl Evaluation {
    fn satisfied() -> Self {
        Self {
            satisfied: true,
            missing: BTreeSet::new(),
        }
    }

    fn unmet(requirement: &Requirement) -> Self {
        Self {
            satisfied: false,
            missing: BTreeSet::from([requirement.clone()]),
        }
    }
}

/// Evaluate `expr` against `completed`.
pub fn evaluate(expr: &PrerequisiteExpression, completed: &CompletedCourses) -> Evaluation {
    match expr {
        PrerequisiteExpression::None => Evaluation::satisfied(),
        PrerequisiteExpression::All(children) | PrerequisiteExpression::Any(children)
            if children.is_empty() =>
        {
            Evaluation::satisfied()
        }
        PrerequisiteExpression::Requirement(requirement) => match requirement {
            Requirement::Course(code) if completed.contains(code) => Evaluation::satisfied(),
            _ => Evaluation::unmet(requirement),
        },
        PrerequisiteExpression::All(children) => {
            let mut result = Evaluation::satisfied();
            for child in children {
                let child = evaluate(child, completed);
                result.satisfied &= child.satisfied;
                result.missing.extend(child.missing);
            }
            result
        }
        PrerequisiteExpression::Any(children) => {
            let mut missing = BTreeSet::new();
            for child in children {
                let child = evaluate(child, completed);
                if child.satisfied {
                    return Evaluation::satisfied();
                }
                missing.extend(child.missing);
            }
            Evaluation {
                satisfied: false,
                missing,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prereq::testing::{completed, course, opaque, requirement};

    fn all(children: Vec<PrerequisiteExpression>) -> PrerequisiteExpression {
        PrerequisiteExpression::All(children)
    }

    fn any(children: Vec<PrerequisiteExpression>) -> PrerequisiteExpression {
        PrerequisiteExpression::Any(children)
    }

    #[test]
    fn test_none_is_always_satisfied() {
        for set in [completed(&[]), completed(&["EEL 3801C", "MAC 2311"])] {
            let eval = evaluate(&PrerequisiteExpression::None, &set);
            assert!(eval.satisfied);
            assert!(eval.missing.is_empty());
        }
    }

    #[test]
    fn test_single_course() {
        let expr = course("EEL 3801C");
        assert!(evaluate(&expr, &completed(&["eel3801c"])).satisfied);

        let eval = evaluate(&expr, &completed(&[]));
        assert!(!eval.satisfied);
        assert_eq!(eval.missing, BTreeSet::from([requirement("EEL 3801C")]));
    }

    #[test]
    fn test_all_requires_every_child() {
        let expr = all(vec![course("EEL 3801C"), course("EEE 3342C")]);

        let eval = evaluate(&expr, &completed(&["EEL 3801C", "EEE 3342C"]));
        assert!(eval.satisfied);
        assert!(eval.missing.is_empty());

        let eval = evaluate(&expr, &completed(&["EEL 3801C"]));
        assert!(!eval.satisfied);
        assert_eq!(eval.missing, BTreeSet::from([requirement("EEE 3342C")]));
    }

    #[test]
    fn test_all_reports_every_unmet_child() {
        let expr = all(vec![course("EEL 3801C"), course("EEE 3342C"), course("MAC 2311")]);
        let eval = evaluate(&expr, &completed(&["MAC 2311"]));
        assert_eq!(
            eval.missing,
            BTreeSet::from([requirement("EEL 3801C"), requirement("EEE 3342C")])
        );
    }

    #[test]
    fn test_any_needs_one_branch() {
        let expr = any(vec![course("EEL 3801C"), course("EEE 3342C")]);

        let eval = evaluate(&expr, &completed(&["EEL 3801C"]));
        assert!(eval.satisfied);
        assert!(eval.missing.is_empty());

        let eval = evaluate(&expr, &completed(&[]));
        assert!(!eval.satisfied);
        assert_eq!(
            eval.missing,
            BTreeSet::from([requirement("EEL 3801C"), requirement("EEE 3342C")])
        );
    }

    #[test]
    fn test_opaque_is_never_satisfied() {
        let expr = opaque("permission of instructor");
        let eval = evaluate(&expr, &completed(&["EEL 3801C", "EEL 4750"]));
        assert!(!eval.satisfied);
        assert_eq!(
            eval.missing,
            BTreeSet::from([Requirement::Opaque("permission of instructor".to_string())])
        );
    }

    #[test]
    fn test_opaque_alternative_can_be_bypassed() {
        let expr = any(vec![course("EEL 4750"), opaque("consent of instructor")]);
        assert!(evaluate(&expr, &completed(&["EEL 4750"])).satisfied);
    }

    #[test]
    fn test_opaque_inside_all_is_reported_even_when_courses_are_done() {
        let expr = all(vec![course("EEL 4750"), opaque("senior standing")]);
        let eval = evaluate(&expr, &completed(&["EEL 4750"]));
        assert!(!eval.satisfied);
        assert_eq!(
            eval.missing,
            BTreeSet::from([Requirement::Opaque("senior standing".to_string())])
        );
    }

    #[test]
    fn test_nested_mixed_tree() {
        // EEL 3801C and (EEE 3342C or (EEE 3307C and MAC 2311))
        let expr = all(vec![
            course("EEL 3801C"),
            any(vec![
                course("EEE 3342C"),
                all(vec![course("EEE 3307C"), course("MAC 2311")]),
            ]),
        ]);

        assert!(evaluate(&expr, &completed(&["EEL 3801C", "EEE 3307C", "MAC 2311"])).satisfied);

        let eval = evaluate(&expr, &completed(&["EEE 3307C"]));
        assert_eq!(
            eval.missing,
            BTreeSet::from([
                requirement("EEL 3801C"),
                requirement("EEE 3342C"),
                requirement("MAC 2311"),
            ])
        );
    }

    #[test]
    fn test_empty_groups_impose_nothing() {
        for expr in [all(vec![]), any(vec![])] {
            for set in [completed(&[]), completed(&["EEL 3801C"])] {
                assert_eq!(evaluate(&expr, &set), evaluate(&PrerequisiteExpression::None, &set));
            }
        }
        let expr = all(vec![any(vec![]), course("EEL 3801C")]);
        assert!(evaluate(&expr, &completed(&["EEL 3801C"])).satisfied);
    }

    #[test]
    fn test_code_split_by_newline_is_satisfied() {
        let expr = crate::prereq::parser::parse_prerequisites(
            "EEL\n3801C and MAC 2311 or 2312",
            crate::prereq::parser::ParseOptions::default(),
        )
        .unwrap();
        let eval = evaluate(&expr, &completed(&["EEL 3801C", "MAC 2312"]));
        assert!(eval.satisfied);
        assert!(eval.missing.is_empty());
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let expr = any(vec![course("EEL 3801C"), opaque("consent")]);
        let set = completed(&["EEE 3342C"]);
        let first = evaluate(&expr, &set);
        assert_eq!(evaluate(&expr, &set), first);
        assert_eq!(evaluate(&expr, &set), first);
    }
}
