//! Command-line interface for course-catalog.
//!
//! Scans the courses directory, writes the catalog JSON and prints a short
//! summary. Only a failure to write the output is fatal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::catalog::{CatalogBuilder, CatalogDocument, ContentSource, LocalSource};
use crate::config::{load_config, BuilderConfig, PathOverrides};

/// course-catalog - Generate the course structure JSON from a directory tree
#[derive(Parser, Debug)]
#[command(name = "course-catalog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the courses directory (default: public/courses under the project root)
    #[arg(long, env = "COURSE_CATALOG_COURSES_DIR")]
    pub courses_dir: Option<PathBuf>,

    /// Output JSON file path (default: src/data/courseStructure.json under the project root)
    #[arg(long, env = "COURSE_CATALOG_OUTPUT")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;

        let config = load_config(
            &cwd,
            PathOverrides {
                courses_dir: self.courses_dir,
                output: self.output,
            },
        )?;

        if let Some(ref path) = config.config_file {
            tracing::debug!("Using config file: {}", path.display());
        }

        generate(&config, &LocalSource)?;
        Ok(())
    }
}

/// Build the catalog from `source`, write it to the configured output and
/// report progress on stdout
pub fn generate(config: &BuilderConfig, source: &dyn ContentSource) -> Result<CatalogDocument> {
    println!("Scanning courses directory: {}", config.courses_dir.display());
    println!("Output file: {}", config.output.display());
    println!();

    let builder = CatalogBuilder::with_options(source, config.scan.clone());
    let catalog = builder.build(&config.courses_dir);

    for course in &catalog.courses {
        println!("  Found course: {} ({} weeks)", course.name, course.weeks.len());
    }

    catalog.save(&config.output)?;

    println!();
    println!("Generated {}", config.output.display());
    println!("Total courses: {}", catalog.course_count());
    println!("Total files: {}", catalog.file_count());

    Ok(catalog)
}
