//! Prerequisite tables.
//!
//! Each row carries up to nine positional cells:
//!
//! | column | meaning             |
//! |--------|---------------------|
//! | 0      | `and`/`or` marker   |
//! | 1      | open-group marker   |
//! | 2      | test name           |
//! | 3      | test score          |
//! | 4      | subject name        |
//! | 5      | course number       |
//! | 6, 7   | unused              |
//! | 8      | close-group marker  |
//!
//! Nesting is only implied by the marker cells, so the tree is rebuilt with a
//! stack of open groups. Every signal on a row is applied, in column order,
//! with the close marker last.

use crate::{
    domain::{resolve, Operator, Requisite, SubjectDirectory},
    parser::{Grouping, ParseError, Row},
};

const OPERATOR: usize = 0;
const OPEN: usize = 1;
const TEST_NAME: usize = 2;
const TEST_SCORE: usize = 3;
const SUBJECT: usize = 4;
const COURSE_NUMBER: usize = 5;
const CLOSE: usize = 8;

/// Deepest group nesting accepted, counting the root as depth zero.
pub const MAX_DEPTH: usize = 64;

/// Parses prerequisite rows, tolerating unbalanced group markers.
///
/// The result is the raw tree; pass it through [`crate::normalize`] before
/// storing or rendering.
///
/// # Errors
///
/// Returns an error if a test score is not a whole number, an operator
/// marker is neither `and` nor `or`, or groups nest deeper than
/// [`MAX_DEPTH`].
pub fn parse_prereqs(rows: &[Row], directory: &SubjectDirectory) -> Result<Requisite, ParseError> {
    parse_prereqs_with(rows, directory, Grouping::Lenient)
}

/// Parses prerequisite rows with the given handling of unbalanced markers.
///
/// # Errors
///
/// As [`parse_prereqs`]. In [`Grouping::Strict`] mode, also returns an error
/// for a close marker with no open group and for a group that is never
/// closed.
pub fn parse_prereqs_with(
    rows: &[Row],
    directory: &SubjectDirectory,
    grouping: Grouping,
) -> Result<Requisite, ParseError> {
    if rows.is_empty() {
        return Ok(Requisite::Empty);
    }

    let mut stack = Stack::default();

    for (index, row) in rows.iter().enumerate() {
        let marker = row.cell(OPERATOR);
        if !marker.is_empty() {
            stack.current().operator = marker.parse().map_err(|_| ParseError::Operator {
                row: index,
                value: marker.to_string(),
            })?;
        }

        if !row.cell(OPEN).is_empty() {
            stack.open(index)?;
        }

        let (name, score) = (row.cell(TEST_NAME), row.cell(TEST_SCORE));
        if !name.is_empty() && !score.is_empty() {
            let score = score.parse::<u32>().map_err(|_| ParseError::Score {
                row: index,
                value: score.to_string(),
            })?;
            stack.current().items.push(Requisite::test(name, score));
        }

        let (subject, number) = (row.cell(SUBJECT), row.cell(COURSE_NUMBER));
        if !subject.is_empty() && !number.is_empty() {
            stack
                .current()
                .items
                .push(Requisite::course(resolve(subject, directory), number));
        }

        if !row.cell(CLOSE).is_empty() && !stack.close() {
            match grouping {
                Grouping::Strict => return Err(ParseError::UnmatchedClose { row: index }),
                Grouping::Lenient => {
                    tracing::warn!("Ignoring close marker on row {index} with no open group");
                }
            }
        }
    }

    stack.finish(grouping)
}

/// A group under construction.
///
/// The operator stays mutable until the group is closed, since the marker
/// that decides it may arrive after the first items.
#[derive(Debug, Default)]
struct GroupBuilder {
    operator: Operator,
    items: Vec<Requisite>,
}

impl GroupBuilder {
    fn build(self) -> Requisite {
        Requisite::group(self.operator, self.items)
    }
}

/// The root group plus every group opened above it, innermost last.
#[derive(Debug, Default)]
struct Stack {
    root: GroupBuilder,
    open: Vec<(usize, GroupBuilder)>,
}

impl Stack {
    fn current(&mut self) -> &mut GroupBuilder {
        match self.open.last_mut() {
            Some((_, group)) => group,
            None => &mut self.root,
        }
    }

    fn open(&mut self, row: usize) -> Result<(), ParseError> {
        if self.open.len() >= MAX_DEPTH {
            return Err(ParseError::TooDeep { row });
        }
        self.open.push((row, GroupBuilder::default()));
        Ok(())
    }

    /// Closes the innermost group into its parent. Returns `false` if only
    /// the root is open.
    fn close(&mut self) -> bool {
        let Some((_, group)) = self.open.pop() else {
            return false;
        };
        let group = group.build();
        self.current().items.push(group);
        true
    }

    fn finish(self, grouping: Grouping) -> Result<Requisite, ParseError> {
        if let Some((row, _)) = self.open.first() {
            if grouping == Grouping::Strict {
                return Err(ParseError::UnclosedGroup { row: *row });
            }
            for (row, group) in &self.open {
                tracing::warn!(
                    "Dropping group opened on row {row} that is never closed ({} items)",
                    group.items.len()
                );
            }
        }
        if self.root.items.is_empty() {
            return Ok(Requisite::Empty);
        }
        Ok(self.root.build())
    }
}

/// Prerequisite tables of the shapes found in scraped catalogs, for tests
/// that check properties over parser output.
#[cfg(test)]
pub(crate) fn sample_tables() -> Vec<Vec<Row>> {
    fn nine(cells: [&str; 9]) -> Row {
        Row::from(cells)
    }

    let mut nested = Vec::new();
    for (i, subject) in ["Computer Science", "Mathematics", "Data Science"]
        .into_iter()
        .enumerate()
    {
        let [a, b, c, d] = [0, 1, 2, 3].map(|offset| (1000 + i * 10 + offset).to_string());
        let and = if i == 0 { "" } else { "and" };
        nested.push(nine([and, "(", "", "", subject, a.as_str(), "", "", ""]));
        nested.push(nine(["or", "", "", "", subject, b.as_str(), "", "", ")"]));
        nested.push(nine(["and", "(", "", "", subject, c.as_str(), "", "", ""]));
        nested.push(nine(["or", "(", "SAT Math", "600", "", "", "", "", ""]));
        nested.push(nine(["and", "", "", "", subject, d.as_str(), "", "", ")"]));
        nested.push(nine(["", "", "", "", "", "", "", "", ")"]));
    }

    vec![
        nested,
        vec![
            nine(["", "(", "", "", "Computer Science", "2500", "", "", ""]),
            nine(["or", "", "", "", "Data Science", "2000", "", "", ")"]),
            nine(["and", "", "", "", "Mathematics", "1341", "", "", ""]),
        ],
        vec![
            nine(["", "(", "", "", "Computer Science", "2500", "", "", ")"]),
            nine(["and", "(", "", "", "Mathematics", "1341", "", "", ""]),
            nine(["", "(", "AP Calculus BC", "4", "", "", "", "", ""]),
            nine(["or", "", "", "", "Quantum Basketweaving", "1000", "", "", ")"]),
            nine(["and", "", "", "", "Physics", "1151", "", "", ")"]),
        ],
        vec![
            nine(["", "(", "", "", "", "", "", "", ""]),
            nine(["", "", "", "", "", "", "", "", ")"]),
            nine(["or", "", "", "", "Computer Science", "1800", "", "", ")"]),
            nine(["", "(", "", "", "Mathematics", "1241", "", "", ""]),
        ],
        vec![Row::default(), nine(["and", "", "", "", "", "", "", "", ""])],
        vec![nine(["", "(", "", "", "Computer Science", "2500", "", "", ""])],
    ]
}
