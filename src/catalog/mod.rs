//! Course catalog generation.
//!
//! Turns a course directory tree into a single JSON index.
//!
//! # Input Layout
//!
//! ```text
//! public/courses/
//! └── DT101 - Introduction to debate/   # course: id "DT101"
//!     ├── Week 1/                        # week: natural order
//!     │   ├── 01 Topic Name.md           # markdown
//!     │   ├── 01 Topic Name.meta         # ignored
//!     │   ├── Handout (Week1) Rules.pdf  # pdf, shown as "Handout: Rules"
//!     │   └── Video Link.link            # link, path is the URL inside
//!     └── Week 2/
//! ```

pub mod classify;
pub mod link;
pub mod model;
pub mod naming;
pub mod scanner;
pub mod source;

pub use classify::IgnoreRules;
pub use link::{resolve_link, LinkError};
pub use model::{CatalogDocument, ContentFile, Course, CourseId, FileType, Week};
pub use naming::{clean_file_name, extract_course_id, natural_cmp, natural_sort_key, NaturalKey};
pub use scanner::{CatalogBuilder, ScanOptions};
pub use source::{ContentSource, Entry, EntryKind, LocalSource, MemorySource};
