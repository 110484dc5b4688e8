//! `.link` file resolution.
//!
//! A link file holds a single external URL. Anything else is rejected and the
//! file is left out of the catalog.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::source::ContentSource;

/// Errors that can occur while resolving a link file
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL in {}: {content}", path.display())]
    InvalidUrl { path: PathBuf, content: String },
}

/// Check if trimmed link content looks like a URL
pub fn is_url(content: &str) -> bool {
    content.starts_with("http://") || content.starts_with("https://")
}

/// Read a link file and return its trimmed URL
pub fn resolve_link(source: &dyn ContentSource, path: &Path) -> Result<String, LinkError> {
    let content = source.read_to_string(path).map_err(|e| LinkError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let url = content.trim();
    if !is_url(url) {
        return Err(LinkError::InvalidUrl {
            path: path.to_path_buf(),
            content: url.to_string(),
        });
    }

    Ok(url.to_string())
}
