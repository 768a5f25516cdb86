//! Prerequisite dependency graph
//!
//! Nodes are courses, edges run from a prerequisite to the course that needs
//! it. Only course-code leaves that name a course of the full catalog produce
//! edges; opaque requirements and unknown codes are left out. Selected courses
//! are grouped by level.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::catalog::course::Course;
use crate::catalog::level::AcademicLevel;
use crate::catalog::Catalog;
use crate::prereq::course_code::CourseCode;

/// Group of prerequisite courses pulled in from outside the selection
pub const PREREQUISITE_GROUP: &str = "prerequisite";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: CourseCode,
    pub title: String,
    pub majors: Vec<String>,
    pub level: AcademicLevel,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct GraphEdge {
    pub from: CourseCode,
    pub to: CourseCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphNode {
    fn new(course: &Course, group: String) -> Self {
        Self {
            id: course.code().clone(),
            title: course.title().to_string(),
            majors: course.majors().to_vec(),
            level: course.level(),
            group,
        }
    }
}

impl DependencyGraph {
    /// Build the graph of `selection`, resolving prerequisites against `catalog`.
    pub fn build(catalog: &Catalog, selection: &[&Course]) -> Self {
        let mut graph = DependencyGraph::default();
        let mut seen: BTreeSet<&CourseCode> = BTreeSet::new();

        for course in selection {
            if seen.insert(course.code()) {
                graph.nodes.push(GraphNode::new(course, course.level().to_string()));
            }
        }

        let mut edges = BTreeSet::new();
        let mut outside = Vec::new();
        for course in selection {
            for code in course.expression().course_codes() {
                let Some(prerequisite) = catalog.get(code) else {
                    continue;
                };
                edges.insert(GraphEdge {
                    from: prerequisite.code().clone(),
                    to: course.code().clone(),
                });
                if seen.insert(prerequisite.code()) {
                    outside.push(prerequisite);
                }
            }
        }

        graph.nodes.extend(
            outside
                .into_iter()
                .map(|course| GraphNode::new(course, PREREQUISITE_GROUP.to_string())),
        );
        graph.edges = edges.into_iter().collect();
        graph
    }
}
