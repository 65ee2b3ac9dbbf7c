use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A prerequisite or corequisite requirement.
///
/// Values are built bottom-up by the parsers and never mutated afterwards.
/// The serialized form is the stored document shape:
///
/// - `Empty` is `{}`
/// - `Course` is `{"subject": "CS", "courseNumber": "2500"}`
/// - `Test` is `{"name": "SAT Math", "score": 600}`
/// - `Group` is `{"type": "and", "items": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Document", into = "Document")]
pub enum Requisite {
    /// No requirement.
    ///
    /// Only valid as a whole-tree result, never as a group member.
    Empty,
    /// A reference to another course.
    Course(Course),
    /// A minimum standardized test score.
    Test(TestScore),
    /// A logical grouping of requirements.
    Group(Group),
}

impl Requisite {
    /// Creates a course reference.
    #[must_use]
    pub fn course(subject: impl Into<String>, course_number: impl Into<String>) -> Self {
        Self::Course(Course::new(subject, course_number))
    }

    /// Creates a test score condition.
    #[must_use]
    pub fn test(name: impl Into<String>, score: u32) -> Self {
        Self::Test(TestScore::new(name, score))
    }

    /// Creates a group with the given operator.
    ///
    /// The group is not normalized; see [`crate::normalize`].
    #[must_use]
    pub const fn group(operator: Operator, items: Vec<Self>) -> Self {
        Self::Group(Group::new(operator, items))
    }

    /// Creates an AND group.
    #[must_use]
    pub const fn and(items: Vec<Self>) -> Self {
        Self::group(Operator::And, items)
    }

    /// Creates an OR group.
    #[must_use]
    pub const fn or(items: Vec<Self>) -> Self {
        Self::group(Operator::Or, items)
    }

    /// Returns `true` if this is [`Requisite::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Normalizes the tree. Shorthand for [`crate::normalize`].
    #[must_use]
    pub fn normalized(self) -> Self {
        crate::normalize(self)
    }

    /// Iterates over every course referenced anywhere in the tree, in order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    Self::Course(course) => return Some(course),
                    Self::Group(group) => stack.extend(group.items.iter().rev()),
                    Self::Empty | Self::Test(_) => {}
                }
            }
            None
        })
    }
}

impl fmt::Display for Requisite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let segments = crate::project(self);
        f.write_str(&crate::render::text(&segments, &crate::Config::default()))
    }
}

/// A reference to a course by subject code and catalog number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Course {
    subject: String,
    course_number: String,
}

impl Course {
    /// Creates a course reference.
    #[must_use]
    pub fn new(subject: impl Into<String>, course_number: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            course_number: course_number.into(),
        }
    }

    /// The short subject code, or [`crate::UNKNOWN_SUBJECT`] if unresolved.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The raw catalog number. May contain letters.
    #[must_use]
    pub fn course_number(&self) -> &str {
        &self.course_number
    }

    /// Whether the subject name could not be resolved to a code.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.subject == crate::UNKNOWN_SUBJECT
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.course_number)
    }
}

/// A standardized test name with a minimum score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestScore {
    name: String,
    score: u32,
}

impl TestScore {
    /// Creates a test score condition.
    #[must_use]
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// The test name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The minimum score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }
}

impl fmt::Display for TestScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

/// An AND/OR node with an ordered list of children.
///
/// Child order is significant for rendering but not for logical meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    operator: Operator,
    items: Vec<Requisite>,
}

impl Group {
    /// Creates a group.
    #[must_use]
    pub const fn new(operator: Operator, items: Vec<Requisite>) -> Self {
        Self { operator, items }
    }

    /// The logical operator joining the items.
    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    /// The group's children.
    #[must_use]
    pub fn items(&self) -> &[Requisite] {
        &self.items
    }

    /// Consumes the group, returning its operator and children.
    #[must_use]
    pub fn into_parts(self) -> (Operator, Vec<Requisite>) {
        (self.operator, self.items)
    }
}

/// A logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// All items are required.
    And,
    /// Any one item is sufficient.
    #[default]
    Or,
}

impl Operator {
    /// The lowercase keyword for this operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    /// Parses an operator marker, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

/// Error returned when an operator marker is neither `and` nor `or`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown operator '{0}': expected 'and' or 'or'")]
pub struct UnknownOperator(pub String);

/// Errors raised when a stored document does not describe a valid requisite.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    /// A group with no items.
    #[error("group '{0}' has no items")]
    EmptyGroup(Operator),

    /// An empty requisite nested inside a group.
    #[error("empty requisite inside '{0}' group")]
    EmptyMember(Operator),
}

/// The stored shape of a requisite.
///
/// Variants are tried in order; every shape rejects unknown fields, so a
/// document that fits none of them fails to deserialize.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Document {
    Group(GroupDocument),
    Course(CourseDocument),
    Test(TestDocument),
    Empty(EmptyDocument),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupDocument {
    #[serde(rename = "type")]
    operator: Operator,
    items: Vec<Document>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct CourseDocument {
    subject: String,
    course_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TestDocument {
    name: String,
    score: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyDocument {}

impl TryFrom<Document> for Requisite {
    type Error = ShapeError;

    fn try_from(document: Document) -> Result<Self, Self::Error> {
        match document {
            Document::Empty(EmptyDocument {}) => Ok(Self::Empty),
            Document::Course(CourseDocument {
                subject,
                course_number,
            }) => Ok(Self::course(subject, course_number)),
            Document::Test(TestDocument { name, score }) => Ok(Self::test(name, score)),
            Document::Group(GroupDocument { operator, items }) => {
                if items.is_empty() {
                    return Err(ShapeError::EmptyGroup(operator));
                }
                let items = items
                    .into_iter()
                    .map(|item| match Self::try_from(item)? {
                        Self::Empty => Err(ShapeError::EmptyMember(operator)),
                        requisite => Ok(requisite),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::group(operator, items))
            }
        }
    }
}

impl From<Requisite> for Document {
    fn from(requisite: Requisite) -> Self {
        match requisite {
            Requisite::Empty => Self::Empty(EmptyDocument {}),
            Requisite::Course(Course {
                subject,
                course_number,
            }) => Self::Course(CourseDocument {
                subject,
                course_number,
            }),
            Requisite::Test(TestScore { name, score }) => Self::Test(TestDocument { name, score }),
            Requisite::Group(Group { operator, items }) => Self::Group(GroupDocument {
                operator,
                items: items.into_iter().map(Self::from).collect(),
            }),
        }
    }
}
