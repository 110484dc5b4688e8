//! course-catalog - Course directory to JSON catalog generator
//!
//! Walks a tree of course folders, week folders and content files and
//! produces the `courseStructure.json` index read by the course website.
//!
//! # Modules
//!
//! - `catalog`: Scanning, naming rules and the catalog document
//! - `config`: Path and scan option resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Scan public/courses and write src/data/courseStructure.json
//! course-catalog
//!
//! # Custom paths
//! course-catalog --courses-dir /path/to/courses --output /path/to/output.json
//! ```

pub mod catalog;
pub mod cli;
pub mod config;

// Re-export main types at crate root for convenience
pub use catalog::{
    CatalogBuilder, CatalogDocument, ContentFile, ContentSource, Course, FileType, LocalSource,
    MemorySource, ScanOptions, Week,
};
pub use config::{load_config, BuilderConfig, PathOverrides};
