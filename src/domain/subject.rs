use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::scrape::{Format, LoadError};

/// The code recorded for a subject name that is not in the directory.
pub const UNKNOWN_SUBJECT: &str = "??";

/// A catalog subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Short code, e.g. `CS`.
    pub code: String,
    /// Full name as it appears in requisite tables, e.g. `Computer Science`.
    pub name: String,
}

/// Lookup from full subject names to short codes.
///
/// Read-only once built. When a name appears more than once, the first entry
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectDirectory {
    codes: HashMap<String, String>,
}

impl SubjectDirectory {
    /// Builds a directory from a list of subjects.
    pub fn new(subjects: impl IntoIterator<Item = Subject>) -> Self {
        let mut codes = HashMap::new();
        for Subject { code, name } in subjects {
            codes.entry(name).or_insert(code);
        }
        Self { codes }
    }

    /// Loads a list of subjects from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not contain a list of `{code, name}` entries.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let subjects: Vec<Subject> = Format::from_path(path)?.read(path)?;
        tracing::debug!("Loaded {} subjects from {}", subjects.len(), path.display());
        Ok(Self::new(subjects))
    }

    /// Returns the code for an exact full-name match.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }

    /// The number of distinct subject names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<Subject> for SubjectDirectory {
    fn from_iter<T: IntoIterator<Item = Subject>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Resolves a full subject name to its short code.
///
/// Never fails: a name with no exact match resolves to [`UNKNOWN_SUBJECT`].
#[must_use]
pub fn resolve(name: &str, directory: &SubjectDirectory) -> String {
    directory.get(name).map_or_else(
        || {
            tracing::debug!("No subject code for '{name}'");
            UNKNOWN_SUBJECT.to_string()
        },
        str::to_string,
    )
}

#[cfg(test)]
pub(crate) fn directory() -> SubjectDirectory {
    [
        ("CS", "Computer Science"),
        ("MATH", "Mathematics"),
        ("DS", "Data Science"),
        ("PHYS", "Physics"),
    ]
    .into_iter()
    .map(|(code, name)| Subject {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    #[test_case("Computer Science", "CS"; "known subject")]
    #[test_case("Mathematics", "MATH"; "another known subject")]
    #[test_case("Quantum Basketweaving", "??"; "unknown subject")]
    #[test_case("computer science", "??"; "match is case sensitive")]
    #[test_case("", "??"; "empty name")]
    fn resolve_looks_up_exact_names(name: &str, expected: &str) {
        assert_eq!(resolve(name, &directory()), expected);
    }

    #[test]
    fn first_entry_wins_for_duplicate_names() {
        let directory = SubjectDirectory::new([
            Subject {
                code: "CS".to_string(),
                name: "Computer Science".to_string(),
            },
            Subject {
                code: "CSX".to_string(),
                name: "Computer Science".to_string(),
            },
        ]);

        assert_eq!(directory.len(), 1);
        assert_eq!(resolve("Computer Science", &directory), "CS");
    }

    #[test]
    fn load_reads_yaml_list() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"- code: CS\n  name: Computer Science\n- code: EECE\n  name: Electrical and Comp Engineering\n")
            .unwrap();

        let directory = SubjectDirectory::load(file.path()).unwrap();

        assert_eq!(directory.get("Electrical and Comp Engineering"), Some("EECE"));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn load_reads_json_list() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"code": "MATH", "name": "Mathematics"}]"#)
            .unwrap();

        let directory = SubjectDirectory::load(file.path()).unwrap();

        assert_eq!(directory.get("Mathematics"), Some("MATH"));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let error = SubjectDirectory::load(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::Format(_)));
    }
}
