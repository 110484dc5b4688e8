//! Catalog document types.
//!
//! The document is built bottom-up by the scanner and serialized once.
//! Field order matches the JSON consumed by the catalog renderer.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::naming::extract_course_id;

/// Top-level catalog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Courses in natural order of their folder names
    pub courses: Vec<Course>,
}

impl CatalogDocument {
    /// Create a catalog from already-scanned courses
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Create an empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of courses in the catalog
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Number of content files across all courses and weeks
    pub fn file_count(&self) -> usize {
        self.courses.iter().map(Course::file_count).sum()
    }

    /// Check if the catalog has no courses
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Render the catalog as pretty-printed JSON (2-space indent, no trailing newline)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize catalog")
    }

    /// Write the catalog to `path`, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        let content = self.to_json()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }
}

/// Short course code taken from the folder name (e.g. `DT101`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(String);

impl CourseId {
    /// Derive the identifier from a course folder name
    pub fn from_folder_name(folder_name: &str) -> Self {
        Self(extract_course_id(folder_name))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course folder with at least one non-empty week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier derived from the folder name
    pub id: CourseId,

    /// Full folder name
    pub name: String,

    /// Never filled by the scanner; kept so renderers can share the schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Non-empty weeks in natural order
    pub weeks: Vec<Week>,
}

impl Course {
    /// Create a course from its folder name and scanned weeks
    pub fn new(folder_name: impl Into<String>, weeks: Vec<Week>) -> Self {
        let name = folder_name.into();
        Self {
            id: CourseId::from_folder_name(&name),
            name,
            description: None,
            weeks,
        }
    }

    /// Number of content files across all weeks
    pub fn file_count(&self) -> usize {
        self.weeks.iter().map(Week::len).sum()
    }
}

/// A week folder with its content files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    /// Folder name, unmodified
    pub name: String,

    /// Content files in natural order of their filenames
    pub files: Vec<ContentFile>,
}

impl Week {
    pub fn new(name: impl Into<String>, files: Vec<ContentFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    /// Display name derived from the filename
    pub name: String,

    /// Web path for local files, literal URL for link files
    pub path: String,

    /// Kind of content
    #[serde(rename = "type")]
    pub file_type: FileType,
}

impl ContentFile {
    pub fn new(name: impl Into<String>, path: impl Into<String>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            file_type,
        }
    }
}

/// Type of content file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Markdown document (`.md`, `.markdown`)
    Markdown,

    /// PDF document
    Pdf,

    /// External URL stored in a `.link` file
    Link,
}

impl FileType {
    /// Tag used in the JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Markdown => "markdown",
            FileType::Pdf => "pdf",
            FileType::Link => "link",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CatalogDocument {
        CatalogDocument::new(vec![Course::new(
            "DT101 - Introduction to debate",
            vec![
                Week::new(
                    "Week 1",
                    vec![
                        ContentFile::new(
                            "Intro",
                            "/courses/DT101 - Introduction to debate/Week 1/01 Intro.md",
                            FileType::Markdown,
                        ),
                        ContentFile::new("Video", "https://example.com/v", FileType::Link),
                    ],
                ),
                Week::new(
                    "Week 2",
                    vec![ContentFile::new(
                        "Handout: Notes",
                        "/courses/DT101 - Introduction to debate/Week 2/Handout (A) Notes.pdf",
                        FileType::Pdf,
                    )],
                ),
            ],
        )])
    }

    #[test]
    fn test_counts() {
        let catalog = sample();
        assert_eq!(catalog.course_count(), 1);
        assert_eq!(catalog.file_count(), 3);
        assert_eq!(catalog.courses[0].file_count(), 3);
        assert!(!catalog.is_empty());
        assert!(CatalogDocument::empty().is_empty());
    }

    #[test]
    fn test_course_id_from_folder_name() {
        let course = Course::new("DT101 - Introduction to debate", Vec::new());
        assert_eq!(course.id.as_str(), "DT101");
        assert_eq!(course.id.to_string(), "DT101");
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "courses": [{
                    "id": "DT101",
                    "name": "DT101 - Introduction to debate",
                    "weeks": [
                        {
                            "name": "Week 1",
                            "files": [
                                {
                                    "name": "Intro",
                                    "path": "/courses/DT101 - Introduction to debate/Week 1/01 Intro.md",
                                    "type": "markdown"
                                },
                                {
                                    "name": "Video",
                                    "path": "https://example.com/v",
                                    "type": "link"
                                }
                            ]
                        },
                        {
                            "name": "Week 2",
                            "files": [{
                                "name": "Handout: Notes",
                                "path": "/courses/DT101 - Introduction to debate/Week 2/Handout (A) Notes.pdf",
                                "type": "pdf"
                            }]
                        }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_description_omitted_when_absent() {
        let json = sample().to_json().unwrap();
        assert!(!json.contains("description"));

        let mut catalog = sample();
        catalog.courses[0].description = Some("Debate basics".to_string());
        let json = catalog.to_json().unwrap();
        assert!(json.contains("\"description\": \"Debate basics\""));
    }

    #[test]
    fn test_empty_catalog_json() {
        let json = CatalogDocument::empty().to_json().unwrap();
        assert_eq!(json, "{\n  \"courses\": []\n}");
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let catalog = CatalogDocument::new(vec![Course::new(
            "PH200 - Éthique",
            vec![Week::new(
                "Semaine 1",
                vec![ContentFile::new("Café", "/courses/x", FileType::Markdown)],
            )],
        )]);
        let json = catalog.to_json().unwrap();
        assert!(json.contains("Éthique"));
        assert!(json.contains("Café"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("src").join("data").join("courseStructure.json");

        sample().save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: CatalogDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_file_type_display() {
        assert_eq!(FileType::Markdown.to_string(), "markdown");
        assert_eq!(FileType::Pdf.as_str(), "pdf");
        assert_eq!(
            serde_json::to_string(&FileType::Link).unwrap(),
            "\"link\""
        );
    }
}
