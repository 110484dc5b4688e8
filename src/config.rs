//! Configuration for course-catalog paths and scan options.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags (`--courses-dir`, `--output`)
//! 2. Environment variables (COURSE_CATALOG_COURSES_DIR, COURSE_CATALOG_OUTPUT)
//! 3. Config file (.course-catalog/config.yaml)
//! 4. Defaults (public/courses, src/data/courseStructure.json)
//!
//! Config file discovery:
//! - Searches the start directory and its parents for .course-catalog/config.yaml
//! - The directory containing .course-catalog/ is the project root
//! - Relative paths in the config file are resolved against the project root

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::ScanOptions;

/// Directory holding the config file
pub const CONFIG_DIR: &str = ".course-catalog";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Default courses directory, relative to the project root
pub const DEFAULT_COURSES_DIR: &str = "public/courses";

/// Default output file, relative to the project root
pub const DEFAULT_OUTPUT: &str = "src/data/courseStructure.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub scan: Option<ScanOptions>,
}

fn default_version() -> String {
    "1".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Courses root (relative to the project root)
    pub courses_dir: Option<String>,
    /// Output JSON file (relative to the project root)
    pub output: Option<String>,
}

/// Paths given explicitly on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub courses_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Fully resolved configuration handed to the builder
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Directory of course folders
    pub courses_dir: PathBuf,
    /// Where the catalog JSON is written
    pub output: PathBuf,
    /// How files are cataloged
    pub scan: ScanOptions,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl BuilderConfig {
    /// Defaults relative to `project_root`, no config file
    pub fn with_root(project_root: &Path) -> Self {
        Self {
            courses_dir: project_root.join(DEFAULT_COURSES_DIR),
            output: project_root.join(DEFAULT_OUTPUT),
            scan: ScanOptions::default(),
            config_file: None,
        }
    }
}

/// Find config file by searching `start` and its parents
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration starting the config search at `start_dir`
pub fn load_config(start_dir: &Path, overrides: PathOverrides) -> Result<BuilderConfig> {
    let mut config = match find_config_file(start_dir) {
        Some(config_path) => {
            let file = load_config_file(&config_path)?;

            // Project root is the parent of .course-catalog/
            let root = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(start_dir)
                .to_path_buf();

            let defaults = BuilderConfig::with_root(&root);

            BuilderConfig {
                courses_dir: file
                    .paths
                    .courses_dir
                    .as_deref()
                    .map(|p| resolve_path(&root, p))
                    .unwrap_or(defaults.courses_dir),
                output: file
                    .paths
                    .output
                    .as_deref()
                    .map(|p| resolve_path(&root, p))
                    .unwrap_or(defaults.output),
                scan: file.scan.unwrap_or_default(),
                config_file: Some(config_path),
            }
        }
        None => BuilderConfig::with_root(start_dir),
    };

    if let Some(courses_dir) = overrides.courses_dir {
        config.courses_dir = courses_dir;
    }
    if let Some(output) = overrides.output {
        config.output = output;
    }

    Ok(config)
}
