//! Course Catalog Requisites
//!
//! Parses the prerequisite and corequisite tables scraped from a course
//! catalog into normalized boolean expression trees of courses and test
//! scores, and flattens those trees for rendering.

pub mod domain;
pub use domain::{
    resolve, Config, Course, Group, Operator, Requisite, ShapeError, Subject, SubjectDirectory,
    TestScore, UNKNOWN_SUBJECT,
};

pub mod parser;
pub use parser::{parse_coreqs, parse_prereqs, parse_prereqs_with, Grouping, ParseError, Row};

mod normalize;
pub use normalize::normalize;

pub mod projection;
pub use projection::{assemble, project, AssembleError, Segment};

pub mod render;

pub mod scrape;
pub use scrape::{load_courses, parse_all, CourseError, CourseRequisites, ScrapedCourse};
