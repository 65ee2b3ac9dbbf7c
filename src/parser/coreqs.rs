//! Corequisite tables.
//!
//! Corequisites are a flat list of courses, one per row, all of which are
//! required. Two row layouts are observed in the source tables:
//!
//! - `[subject, number, title]` (and a two-cell variant without the title)
//! - `[_, subject, number, title]`

use crate::{
    domain::{resolve, Requisite, SubjectDirectory},
    parser::Row,
};

/// Parses corequisite rows.
///
/// Returns [`Requisite::Empty`] for no courses, the course itself for a single
/// row, and an AND group otherwise. Every row with at least one cell yields a
/// course, even when its subject or number cell is blank: an unreadable
/// subject resolves to [`crate::UNKNOWN_SUBJECT`] and the number is kept as
/// it is.
#[must_use]
pub fn parse_coreqs(rows: &[Row], directory: &SubjectDirectory) -> Requisite {
    let mut courses: Vec<Requisite> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| course_from_row(index, row, directory))
        .collect();

    if courses.len() > 1 {
        Requisite::and(courses)
    } else {
        courses.pop().unwrap_or(Requisite::Empty)
    }
}

fn course_from_row(index: usize, row: &Row, directory: &SubjectDirectory) -> Option<Requisite> {
    if row.is_empty() {
        tracing::warn!("Skipping corequisite row {index} with no cells");
        return None;
    }

    let (subject, number) = if row.len() >= 4 {
        (row.cell(1), row.cell(2))
    } else {
        (row.cell(0), row.cell(1))
    };

    if subject.is_empty() || number.is_empty() {
        tracing::warn!(
            "Corequisite row {index} is missing its subject or number: {:?}",
            row.cells()
        );
    }

    Some(Requisite::course(resolve(subject, directory), number))
}
