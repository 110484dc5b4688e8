//! Course tree scanner.
//!
//! Walks `root/<course>/<week>/<file>` and aggregates bottom-up: files into
//! weeks, weeks into courses, courses into the catalog. Every level is sorted
//! naturally by name, hidden directories are skipped, and empty weeks and
//! courses are dropped. Per-item failures are logged and skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classify::IgnoreRules;
use super::link::resolve_link;
use super::model::{CatalogDocument, ContentFile, Course, FileType, Week};
use super::naming::{clean_file_name, natural_sort};
use super::source::{ContentSource, Entry};

/// Default prefix for constructed file paths
pub const DEFAULT_WEB_PREFIX: &str = "/courses";

/// Options controlling how files are cataloged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Prefix for web paths of local files (`/courses/<course>/<week>/<file>`)
    #[serde(default = "default_web_prefix")]
    pub web_prefix: String,

    /// Filename substrings to skip
    #[serde(default)]
    pub ignore: IgnoreRules,
}

fn default_web_prefix() -> String {
    DEFAULT_WEB_PREFIX.to_string()
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            web_prefix: default_web_prefix(),
            ignore: IgnoreRules::default(),
        }
    }
}

/// Builds a [`CatalogDocument`] from a course tree
pub struct CatalogBuilder<'a> {
    source: &'a dyn ContentSource,
    options: ScanOptions,
}

impl<'a> CatalogBuilder<'a> {
    /// Create a builder with default options
    pub fn new(source: &'a dyn ContentSource) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    /// Create a builder with custom options
    pub fn with_options(source: &'a dyn ContentSource, options: ScanOptions) -> Self {
        Self { source, options }
    }

    /// Scan the courses root and build the catalog.
    ///
    /// A missing or unreadable root yields an empty catalog.
    pub fn build(&self, courses_dir: &Path) -> CatalogDocument {
        if !self.source.exists(courses_dir) {
            tracing::warn!(
                source = self.source.name(),
                "Courses directory does not exist: {}",
                courses_dir.display()
            );
            return CatalogDocument::empty();
        }

        if !self.source.is_dir(courses_dir) {
            tracing::warn!(
                source = self.source.name(),
                "Courses path is not a directory: {}",
                courses_dir.display()
            );
            return CatalogDocument::empty();
        }

        let courses = self
            .visible_dirs(courses_dir)
            .iter()
            .filter_map(|entry| self.scan_course(&entry.path))
            .inspect(|course| {
                tracing::info!(
                    source = self.source.name(),
                    course = %course.id,
                    weeks = course.weeks.len(),
                    "Found course: {}",
                    course.name
                );
            })
            .collect();

        CatalogDocument::new(courses)
    }

    /// Scan one course folder. Returns `None` if no week has content.
    pub fn scan_course(&self, course_path: &Path) -> Option<Course> {
        if !self.source.is_dir(course_path) {
            return None;
        }

        let folder_name = dir_name(course_path)?;

        let weeks: Vec<Week> = self
            .visible_dirs(course_path)
            .into_iter()
            .filter_map(|entry| {
                let files = self.scan_week(&entry.path, folder_name, &entry.name);
                if files.is_empty() {
                    tracing::debug!("Skipping empty week: {}", entry.path.display());
                    None
                } else {
                    Some(Week::new(entry.name, files))
                }
            })
            .collect();

        if weeks.is_empty() {
            tracing::debug!("Skipping course without content: {}", course_path.display());
            return None;
        }

        Some(Course::new(folder_name, weeks))
    }

    /// Scan one week folder into its content files
    pub fn scan_week(
        &self,
        week_path: &Path,
        course_folder: &str,
        week_folder: &str,
    ) -> Vec<ContentFile> {
        if !self.source.is_dir(week_path) {
            return Vec::new();
        }

        let mut entries: Vec<Entry> = self
            .list(week_path)
            .into_iter()
            .filter(Entry::is_file)
            .collect();
        natural_sort(&mut entries, |e| e.name.as_str());

        entries
            .iter()
            .filter_map(|entry| self.scan_file(entry, course_folder, week_folder))
            .collect()
    }

    /// Turn one file entry into a catalog entry, `None` if it is skipped
    fn scan_file(&self, entry: &Entry, course_folder: &str, week_folder: &str) -> Option<ContentFile> {
        let filename = entry.name.as_str();

        if self.options.ignore.is_ignored(filename) {
            return None;
        }

        let file_type = FileType::from_filename(filename)?;
        let display_name = clean_file_name(filename);

        let path = match file_type {
            FileType::Link => match resolve_link(self.source, &entry.path) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("{}", e);
                    return None;
                }
            },
            FileType::Markdown | FileType::Pdf => self.web_path(course_folder, week_folder, filename),
        };

        Some(ContentFile::new(display_name, path, file_type))
    }

    fn web_path(&self, course_folder: &str, week_folder: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.options.web_prefix.trim_end_matches('/'),
            course_folder,
            week_folder,
            filename
        )
    }

    /// Non-hidden subdirectories in natural order
    fn visible_dirs(&self, path: &Path) -> Vec<Entry> {
        let mut dirs: Vec<Entry> = self
            .list(path)
            .into_iter()
            .filter(|e| e.is_dir() && !e.is_hidden())
            .collect();
        natural_sort(&mut dirs, |e| e.name.as_str());
        dirs
    }

    fn list(&self, path: &Path) -> Vec<Entry> {
        match self.source.list_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    source = self.source.name(),
                    "Could not list {}: {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}

fn dir_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str();
    if name.is_none() {
        tracing::warn!("Skipping non-UTF-8 directory: {}", path.display());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::MemorySource;
    use std::path::PathBuf;

    const COURSE: &str = "DT101 - Introduction to debate";

    fn root() -> PathBuf {
        PathBuf::from("/courses")
    }

    fn course_dir() -> PathBuf {
        root().join(COURSE)
    }

    #[test]
    fn test_scan_week_orders_and_classifies() {
        let mut source = MemorySource::new();
        let week = course_dir().join("Week 1");
        source
            .add_file(week.join("10 Closing.md"), "")
            .add_file(week.join("2 Structure.pdf"), "")
            .add_file(week.join("01 - Intro to Logic.md"), "")
            .add_file(week.join("01 - Intro to Logic.meta"), "{}")
            .add_file(week.join("Video.link"), "https://example.com/x\n")
            .add_file(week.join("slides.pptx"), "")
            .add_dir(week.join("nested.md"));

        let builder = CatalogBuilder::new(&source);
        let files = builder.scan_week(&week, COURSE, "Week 1");

        assert_eq!(
            files,
            vec![
                ContentFile::new(
                    "Intro to Logic",
                    format!("/courses/{}/Week 1/01 - Intro to Logic.md", COURSE),
                    FileType::Markdown,
                ),
                ContentFile::new(
                    "Structure",
                    format!("/courses/{}/Week 1/2 Structure.pdf", COURSE),
                    FileType::Pdf,
                ),
                ContentFile::new(
                    "Closing",
                    format!("/courses/{}/Week 1/10 Closing.md", COURSE),
                    FileType::Markdown,
                ),
                ContentFile::new("Video", "https://example.com/x", FileType::Link),
            ]
        );
    }

    #[test]
    fn test_scan_week_skips_bad_links() {
        let mut source = MemorySource::new();
        let week = course_dir().join("Week 1");
        source
            .add_file(week.join("a.link"), "not a url")
            .add_file(week.join("b.link"), [0xffu8])
            .add_file(week.join("c.link"), "https://example.com/c");

        let files = CatalogBuilder::new(&source).scan_week(&week, COURSE, "Week 1");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "https://example.com/c");
        assert_eq!(files[0].file_type, FileType::Link);
    }

    #[test]
    fn test_scan_week_missing_dir() {
        let source = MemorySource::new();
        let files = CatalogBuilder::new(&source).scan_week(Path::new("/nope"), COURSE, "Week 1");
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_course_drops_empty_and_hidden_weeks() {
        let mut source = MemorySource::new();
        let course = course_dir();
        source
            .add_file(course.join("Week 10/a.md"), "")
            .add_file(course.join("Week 2/b.pdf"), "")
            .add_file(course.join("Week 3/.DS_Store"), "")
            .add_file(course.join(".drafts/c.md"), "")
            .add_file(course.join("README.md"), "")
            .add_dir(course.join("Week 1"));

        let course = CatalogBuilder::new(&source).scan_course(&course).unwrap();

        assert_eq!(course.id.as_str(), "DT101");
        assert_eq!(course.name, COURSE);
        assert!(course.description.is_none());
        let weeks: Vec<_> = course.weeks.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(weeks, vec!["Week 2", "Week 10"]);
    }

    #[test]
    fn test_scan_course_without_content() {
        let mut source = MemorySource::new();
        source
            .add_file(course_dir().join("Week 1/notes.txt"), "")
            .add_file(course_dir().join("Week 2/.gitkeep"), "");

        assert!(CatalogBuilder::new(&source).scan_course(&course_dir()).is_none());
    }

    #[test]
    fn test_build_sorts_and_filters_courses() {
        let mut source = MemorySource::new();
        source
            .add_file("/courses/DT110 - Advanced/Week 1/a.md", "")
            .add_file("/courses/DT101 - Intro/Week 1/a.md", "")
            .add_file("/courses/DT20 - Middle/Week 1/a.md", "")
            .add_file("/courses/.archive/Week 1/a.md", "")
            .add_dir("/courses/EMPTY1 - Nothing/Week 1")
            .add_file("/courses/loose.md", "");

        let catalog = CatalogBuilder::new(&source).build(&root());

        let ids: Vec<_> = catalog.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["DT20", "DT101", "DT110"]);
        assert_eq!(catalog.file_count(), 3);
    }

    #[test]
    fn test_build_missing_root() {
        let source = MemorySource::new();
        let catalog = CatalogBuilder::new(&source).build(Path::new("/missing"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_build_root_is_file() {
        let mut source = MemorySource::new();
        source.add_file("/courses", "oops");
        assert!(CatalogBuilder::new(&source).build(&root()).is_empty());
    }

    #[test]
    fn test_unlistable_week_is_dropped() {
        let mut source = MemorySource::new();
        source
            .add_file(course_dir().join("Week 1/a.md"), "")
            .add_sealed_dir(course_dir().join("Week 2"))
            .add_file(course_dir().join("Week 3/c.pdf"), "");

        let builder = CatalogBuilder::new(&source);
        assert!(builder
            .scan_week(&course_dir().join("Week 2"), COURSE, "Week 2")
            .is_empty());

        let course = builder.scan_course(&course_dir()).unwrap();
        let weeks: Vec<_> = course.weeks.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(weeks, vec!["Week 1", "Week 3"]);
    }

    #[test]
    fn test_unlistable_course_is_dropped() {
        let mut source = MemorySource::new();
        source
            .add_sealed_dir("/courses/DT100 - Locked")
            .add_file("/courses/DT101 - Open/Week 1/a.md", "");

        let catalog = CatalogBuilder::new(&source).build(&root());

        let ids: Vec<_> = catalog.courses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["DT101"]);
    }

    #[test]
    fn test_unlistable_root_yields_empty_catalog() {
        let mut source = MemorySource::new();
        source.add_sealed_dir("/courses");

        assert!(CatalogBuilder::new(&source).build(&root()).is_empty());
    }

    #[test]
    fn test_custom_options() {
        let mut source = MemorySource::new();
        source
            .add_file(course_dir().join("Week 1/Essay [draft].md"), "")
            .add_file(course_dir().join("Week 1/Essay.md"), "")
            .add_file(course_dir().join("Week 1/.DS_Store.md"), "");

        let options = ScanOptions {
            web_prefix: "/static/courses/".to_string(),
            ignore: IgnoreRules::new(["[draft]"]),
        };
        let builder = CatalogBuilder::with_options(&source, options);
        let files = builder.scan_week(&course_dir().join("Week 1"), COURSE, "Week 1");

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                format!("/static/courses/{}/Week 1/.DS_Store.md", COURSE),
                format!("/static/courses/{}/Week 1/Essay.md", COURSE),
            ]
        );
    }
}
