//! File classification and ignore rules.
//!
//! Classification is by lowercase extension only. Ignore rules run first and
//! match on substrings of the filename, so `notes.meta` and `notes.meta.md`
//! are both skipped.

use std::path::Path;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use super::model::FileType;

/// Recognized extensions and their content types
pub const FILE_TYPES: &[(&str, FileType)] = &[
    ("md", FileType::Markdown),
    ("markdown", FileType::Markdown),
    ("pdf", FileType::Pdf),
    ("link", FileType::Link),
];

/// Filename substrings that are never cataloged
pub const DEFAULT_IGNORE: &[&str] = &[".meta", ".DS_Store", "Thumbs.db", ".gitkeep"];

impl FileType {
    /// Classify a filename by its extension, `None` if unsupported
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();

        FILE_TYPES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, file_type)| *file_type)
    }
}

/// Substring-based ignore rules, compiled to glob patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IgnoreRules {
    substrings: Vec<String>,
    #[serde(skip)]
    patterns: Vec<Pattern>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE.iter().map(|s| s.to_string()))
    }
}

impl IgnoreRules {
    /// Build rules from filename substrings
    pub fn new(substrings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let substrings: Vec<String> = substrings.into_iter().map(Into::into).collect();
        let patterns = substrings
            .iter()
            .filter_map(|s| {
                let glob = format!("*{}*", Pattern::escape(s));
                match Pattern::new(&glob) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        tracing::warn!("Ignoring invalid ignore pattern {:?}: {}", s, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            substrings,
            patterns,
        }
    }

    /// Substrings these rules were built from
    pub fn substrings(&self) -> &[String] {
        &self.substrings
    }

    /// Check if a filename contains any ignored substring
    pub fn is_ignored(&self, filename: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(filename))
    }
}

impl From<Vec<String>> for IgnoreRules {
    fn from(substrings: Vec<String>) -> Self {
        Self::new(substrings)
    }
}

impl From<IgnoreRules> for Vec<String> {
    fn from(rules: IgnoreRules) -> Self {
        rules.substrings
    }
}
