//! Factories shared by the unit tests of the prerequisite core.

use crate::prereq::completed::CompletedCourses;
use crate::prereq::course_code::CourseCode;
use crate::prereq::lexer::Token;
use crate::prereq::parser::{PrerequisiteExpression, Requirement};

pub fn code(raw: &str) -> CourseCode {
    CourseCode::parse(raw).unwrap()
}

pub fn code_token(raw: &str) -> Token {
    Token::Code(code(raw))
}

pub fn course(raw: &str) -> PrerequisiteExpression {
    PrerequisiteExpression::course(code(raw))
}

pub fn opaque(text: &str) -> PrerequisiteExpression {
    PrerequisiteExpression::opaque(text)
}

pub fn requirement(raw: &str) -> Requirement {
    Requirement::Course(code(raw))
}

pub fn completed(raws: &[&str]) -> CompletedCourses {
    raws.iter().map(|raw| code(raw)).collect()
}
