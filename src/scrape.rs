//! Scraped course documents and batch processing.
//!
//! The scraper hands over one document per course holding the extracted
//! prerequisite and corequisite table rows. This module loads those documents
//! from JSON or YAML files and turns them into normalized requisites.

use std::{
    ffi::OsStr,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use walkdir::WalkDir;

use crate::{
    domain::{Requisite, SubjectDirectory},
    normalize,
    parser::{parse_coreqs, parse_prereqs_with, Grouping, ParseError, Row},
};

/// Extracted requisite tables for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedCourse {
    /// Term code, e.g. `202610`.
    pub term: String,
    /// Subject code of the course itself.
    pub subject: String,
    /// Catalog number of the course itself.
    pub course_number: String,
    /// Rows of the prerequisite table.
    #[serde(default)]
    pub prereq_rows: Vec<Row>,
    /// Rows of the corequisite table.
    #[serde(default)]
    pub coreq_rows: Vec<Row>,
}

impl ScrapedCourse {
    /// Parses and normalizes both requisite tables.
    ///
    /// # Errors
    ///
    /// Returns an error naming this course if the prerequisite table is
    /// malformed.
    pub fn parse(
        &self,
        directory: &SubjectDirectory,
        grouping: Grouping,
    ) -> Result<CourseRequisites, CourseError> {
        let prereqs = parse_prereqs_with(&self.prereq_rows, directory, grouping).map_err(
            |reason| CourseError {
                course: self.label(),
                reason,
            },
        )?;
        let coreqs = parse_coreqs(&self.coreq_rows, directory);

        Ok(CourseRequisites {
            term: self.term.clone(),
            subject: self.subject.clone(),
            course_number: self.course_number.clone(),
            prereqs: normalize(prereqs),
            coreqs: normalize(coreqs),
        })
    }

    /// A short human-readable name, e.g. `CS 3500 (202610)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.subject, self.course_number, self.term)
    }
}

/// The normalized requisites of one course, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequisites {
    /// Term code.
    pub term: String,
    /// Subject code of the course itself.
    pub subject: String,
    /// Catalog number of the course itself.
    pub course_number: String,
    /// Normalized prerequisites.
    pub prereqs: Requisite,
    /// Normalized corequisites.
    pub coreqs: Requisite,
}

impl CourseRequisites {
    /// Whether any referenced course has an unresolved subject.
    #[must_use]
    pub fn has_unresolved_subjects(&self) -> bool {
        self.prereqs
            .courses()
            .chain(self.coreqs.courses())
            .any(crate::Course::is_unresolved)
    }
}

/// A course whose requisites could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid prerequisites for {course}: {reason}")]
pub struct CourseError {
    /// The course, as returned by [`ScrapedCourse::label`].
    pub course: String,
    /// What went wrong.
    #[source]
    pub reason: ParseError,
}

/// Parses a batch of courses in parallel.
///
/// Results are returned in input order; a failing course does not affect the
/// others.
#[must_use]
pub fn parse_all(
    courses: &[ScrapedCourse],
    directory: &SubjectDirectory,
    grouping: Grouping,
) -> Vec<Result<CourseRequisites, CourseError>> {
    courses
        .par_iter()
        .map(|course| course.parse(directory, grouping))
        .collect()
}

/// Loads scraped courses from a file or a directory tree.
///
/// Each file holds either one course or a list of courses. Directories are
/// walked recursively for `.json`, `.yaml` and `.yml` files, in file name
/// order.
///
/// # Errors
///
/// Returns an error if any file cannot be read or parsed.
pub fn load_courses(path: &Path) -> Result<Vec<ScrapedCourse>, LoadError> {
    if !path.is_dir() {
        return load_course_file(path);
    }

    let paths = collect_document_paths(path);
    tracing::debug!("Found {} course files in {}", paths.len(), path.display());

    let batches = paths
        .par_iter()
        .map(|path| load_course_file(path))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(batches.into_iter().flatten().collect())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CourseFile {
    Many(Vec<ScrapedCourse>),
    One(Box<ScrapedCourse>),
}

fn load_course_file(path: &Path) -> Result<Vec<ScrapedCourse>, LoadError> {
    let courses = match Format::from_path(path)?.read::<CourseFile>(path)? {
        CourseFile::Many(courses) => courses,
        CourseFile::One(course) => vec![*course],
    };
    tracing::debug!("Loaded {} courses from {}", courses.len(), path.display());
    Ok(courses)
}

fn collect_document_paths(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| Format::from_path(entry.path()).is_ok())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// A supported document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl Format {
    /// Picks the format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Format`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LoadError::Format(path.to_path_buf())),
        }
    }

    /// Reads and deserializes a file in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its content does not
    /// deserialize into `T`.
    pub fn read<T: DeserializeOwned>(self, path: &Path) -> Result<T, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        match self {
            Self::Json => serde_json::from_reader(reader).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Self::Yaml => serde_yaml::from_reader(reader).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Errors that can occur when loading input documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported file type: {}", .0.display())]
    Format(PathBuf),

    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The file is not valid JSON for the expected document.
    #[error("invalid JSON in {}", .path.display())]
    Json {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The file is not valid YAML for the expected document.
    #[error("invalid YAML in {}", .path.display())]
    Yaml {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::subject::directory;

    fn course(number: &str, prereq_rows: Vec<Row>) -> ScrapedCourse {
        ScrapedCourse {
            term: "202610".to_string(),
            subject: "CS".to_string(),
            course_number: number.to_string(),
            prereq_rows,
            coreq_rows: Vec::new(),
        }
    }

    fn prereq(operator: &str, open: &str, subject: &str, number: &str, close: &str) -> Row {
        Row::from([operator, open, "", "", subject, number, "", "", close])
    }

    #[test]
    fn parse_normalizes_both_tables() {
        let mut scraped = course(
            "3500",
            vec![
                prereq("", "(", "Computer Science", "2510", ""),
                prereq("or", "", "Data Science", "2500", ")"),
                prereq("and", "", "Computer Science", "2500", ""),
            ],
        );
        scraped.coreq_rows = vec![Row::from(["Computer Science", "3501", "Lab for CS 3500"])];

        let parsed = scraped.parse(&directory(), Grouping::Lenient).unwrap();

        assert_eq!(
            parsed.prereqs,
            Requisite::and(vec![
                Requisite::or(vec![
                    Requisite::course("CS", "2510"),
                    Requisite::course("DS", "2500"),
                ]),
                Requisite::course("CS", "2500"),
            ])
        );
        assert_eq!(parsed.coreqs, Requisite::course("CS", "3501"));
        assert!(!parsed.has_unresolved_subjects());
    }

    #[test]
    fn parse_reports_course_on_error() {
        let scraped = course(
            "3500",
            vec![Row::from(["", "", "SAT Math", "high", "", "", "", "", ""])],
        );

        let error = scraped.parse(&directory(), Grouping::Lenient).unwrap_err();

        assert_eq!(error.course, "CS 3500 (202610)");
        assert_eq!(error.reason.row(), 0);
        assert_eq!(
            error.to_string(),
            "invalid prerequisites for CS 3500 (202610): row 0: test score 'high' is not a whole number"
        );
    }

    #[test]
    fn parse_all_keeps_order_and_isolates_failures() {
        let courses = vec![
            course("1800", Vec::new()),
            course("2500", vec![prereq("nor", "", "Mathematics", "1341", "")]),
            course(
                "2510",
                vec![prereq("", "", "Quantum Basketweaving", "1000", "")],
            ),
        ];

        let results = parse_all(&courses, &directory(), Grouping::Lenient);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().prereqs, Requisite::Empty);
        assert!(results[1].is_err());
        let third = results[2].as_ref().unwrap();
        assert_eq!(third.course_number, "2510");
        assert_eq!(third.prereqs, Requisite::course("??", "1000"));
        assert!(third.has_unresolved_subjects());
    }

    #[test]
    fn load_courses_reads_single_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cs2500.yaml");
        fs::write(
            &path,
            "term: '202610'\nsubject: CS\ncourseNumber: '2500'\ncoreqRows:\n  - [Computer Science, '2501', Lab]\n",
        )
        .unwrap();

        let courses = load_courses(&path).unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_number, "2500");
        assert!(courses[0].prereq_rows.is_empty());
        assert_eq!(courses[0].coreq_rows[0].cell(1), "2501");
    }

    #[test]
    fn load_courses_walks_directories_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("cs");
        fs::create_dir(&nested).unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"[{"term": "202610", "subject": "MATH", "courseNumber": "1341"}]"#,
        )
        .unwrap();
        fs::write(
            nested.join("b.yml"),
            "- term: '202610'\n  subject: CS\n  courseNumber: '2500'\n- term: '202610'\n  subject: CS\n  courseNumber: '2510'\n",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "not a course").unwrap();

        let courses = load_courses(tmp.path()).unwrap();
        let numbers: Vec<&str> = courses.iter().map(|c| c.course_number.as_str()).collect();

        assert_eq!(numbers, ["1341", "2500", "2510"]);
    }

    #[test]
    fn load_courses_reports_invalid_documents() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, r#"{"term": 202610}"#).unwrap();

        let error = load_courses(&path).unwrap_err();

        assert!(matches!(error, LoadError::Json { .. }));
    }

    #[test]
    fn stored_requisites_round_trip_through_json() {
        let requisites = CourseRequisites {
            term: "202610".to_string(),
            subject: "CS".to_string(),
            course_number: "3500".to_string(),
            prereqs: Requisite::and(vec![
                Requisite::course("CS", "2510"),
                Requisite::test("AP Computer Science A", 4),
            ]),
            coreqs: Requisite::Empty,
        };

        let json = serde_json::to_string(&requisites).unwrap();
        assert!(json.contains(r#""coreqs":{}"#), "{json}");

        let decoded: CourseRequisites = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, requisites);
    }
}
