//! Flattening requisite trees into renderer-agnostic segments.
//!
//! A renderer walks the segments in order and decides how each looks; the
//! projection only decides what appears and where the parentheses go.

use crate::domain::{Course, Group, Operator, Requisite, TestScore};

/// One piece of a flattened requisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A course, usually rendered as a link to its catalog page.
    CourseLink(&'a Course),
    /// A test name and minimum score.
    TestLabel(&'a TestScore),
    /// The operator joining two neighbouring items.
    Operator(Operator),
    /// Start of a parenthesized group.
    GroupOpen,
    /// End of a parenthesized group.
    GroupClose,
    /// The whole requisite is empty.
    NoRequirement,
}

/// Flattens a requisite into segments.
///
/// The top-level group is not parenthesized; every nested group is.
#[must_use]
pub fn project(requisite: &Requisite) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    match requisite {
        Requisite::Group(group) => project_items(group, &mut segments),
        other => project_into(other, &mut segments),
    }
    segments
}

fn project_into<'a>(requisite: &'a Requisite, segments: &mut Vec<Segment<'a>>) {
    match requisite {
        Requisite::Empty => segments.push(Segment::NoRequirement),
        Requisite::Course(course) => segments.push(Segment::CourseLink(course)),
        Requisite::Test(test) => segments.push(Segment::TestLabel(test)),
        Requisite::Group(group) => {
            segments.push(Segment::GroupOpen);
            project_items(group, segments);
            segments.push(Segment::GroupClose);
        }
    }
}

fn project_items<'a>(group: &'a Group, segments: &mut Vec<Segment<'a>>) {
    for (index, item) in group.items().iter().enumerate() {
        if index > 0 {
            segments.push(Segment::Operator(group.operator()));
        }
        project_into(item, segments);
    }
}

/// Errors raised when a segment sequence does not describe a requisite.
///
/// Positions are indices into the segment slice.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssembleError {
    /// An operand was expected but the sequence ended.
    #[error("segment {position}: expected a course, test or group")]
    MissingOperand {
        /// Where the operand was expected.
        position: usize,
    },

    /// A segment that cannot appear where it does.
    #[error("segment {position}: unexpected segment")]
    Unexpected {
        /// The offending segment.
        position: usize,
    },

    /// Two different operators at the same nesting level.
    #[error("segment {position}: operator differs from earlier operators in the same group")]
    MixedOperators {
        /// The offending operator segment.
        position: usize,
    },

    /// A group open with no matching close.
    #[error("segment {position}: group is never closed")]
    UnclosedGroup {
        /// The group open segment.
        position: usize,
    },

    /// A no-requirement marker alongside other segments.
    #[error("segment {position}: 'no requirement' must be the only segment")]
    StrayNoRequirement {
        /// The offending segment.
        position: usize,
    },
}

/// Rebuilds a requisite from its segments.
///
/// This is the inverse of [`project`] for normalized trees.
///
/// # Errors
///
/// Returns an error if the segments are not a well-formed projection.
pub fn assemble(segments: &[Segment<'_>]) -> Result<Requisite, AssembleError> {
    if let [Segment::NoRequirement] = segments {
        return Ok(Requisite::Empty);
    }

    let mut cursor = Cursor {
        segments,
        position: 0,
    };
    let requisite = cursor.sequence()?;

    if cursor.position < segments.len() {
        return Err(AssembleError::Unexpected {
            position: cursor.position,
        });
    }
    Ok(requisite)
}

struct Cursor<'s, 'a> {
    segments: &'s [Segment<'a>],
    position: usize,
}

impl<'a> Cursor<'_, 'a> {
    fn peek(&self) -> Option<Segment<'a>> {
        self.segments.get(self.position).copied()
    }

    /// Parses `operand (operator operand)*`.
    fn sequence(&mut self) -> Result<Requisite, AssembleError> {
        let mut items = vec![self.operand()?];
        let mut operator = None;

        while let Some(Segment::Operator(next)) = self.peek() {
            let position = self.position;
            self.position += 1;
            match operator {
                Some(current) if current != next => {
                    return Err(AssembleError::MixedOperators { position });
                }
                _ => operator = Some(next),
            }
            items.push(self.operand()?);
        }

        Ok(match operator {
            Some(operator) => Requisite::group(operator, items),
            None => items.swap_remove(0),
        })
    }

    fn operand(&mut self) -> Result<Requisite, AssembleError> {
        let position = self.position;
        let segment = self
            .peek()
            .ok_or(AssembleError::MissingOperand { position })?;
        self.position += 1;

        match segment {
            Segment::CourseLink(course) => Ok(Requisite::Course(course.clone())),
            Segment::TestLabel(test) => Ok(Requisite::Test(test.clone())),
            Segment::GroupOpen => {
                let inner = self.sequence()?;
                if self.peek() == Some(Segment::GroupClose) {
                    self.position += 1;
                    Ok(inner)
                } else {
                    Err(AssembleError::UnclosedGroup { position })
                }
            }
            Segment::NoRequirement => Err(AssembleError::StrayNoRequirement { position }),
            Segment::Operator(_) | Segment::GroupClose => {
                Err(AssembleError::Unexpected { position })
            }
        }
    }
}
