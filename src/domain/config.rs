use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::Grouping;

/// Configuration for parsing and rendering requisites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Path prefix for course links in rendered markdown.
    ///
    /// Links are built as `{catalog_path}/{term}/{subject}%20{number}`.
    catalog_path: String,

    /// Text rendered for a course with no requirement.
    none_label: String,

    /// Whether unbalanced group markers in prerequisite rows are errors.
    ///
    /// When `false` (default), unmatched close markers are ignored and groups
    /// that are never closed are dropped from the tree.
    pub strict_grouping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            none_label: default_none_label(),
            strict_grouping: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the link prefix for rendered courses, without a trailing slash.
    #[must_use]
    pub fn catalog_path(&self) -> &str {
        self.catalog_path.trim_end_matches('/')
    }

    /// Returns the label rendered for an empty requisite.
    #[must_use]
    pub fn none_label(&self) -> &str {
        &self.none_label
    }

    /// Returns the grouping mode for the prerequisite parser.
    #[must_use]
    pub const fn grouping(&self) -> Grouping {
        if self.strict_grouping {
            Grouping::Strict
        } else {
            Grouping::Lenient
        }
    }
}

fn default_catalog_path() -> String {
    "/catalog".to_string()
}

fn default_none_label() -> String {
    "None".to_string()
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_catalog_path")]
        catalog_path: String,

        #[serde(default = "default_none_label")]
        none_label: String,

        #[serde(default)]
        strict_grouping: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                catalog_path,
                none_label,
                strict_grouping,
            } => Self {
                catalog_path,
                none_label,
                strict_grouping,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            catalog_path: config.catalog_path,
            none_label: config.none_label,
            strict_grouping: config.strict_grouping,
        }
    }
}
