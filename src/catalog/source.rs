//! Filesystem access for the scanner.
//!
//! The scanner only needs to list one directory and read one file at a time.
//! `LocalSource` does that against the real filesystem; `MemorySource` holds an
//! in-memory tree for tests.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry (symlinks are followed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Other,
}

/// A single directory entry with a UTF-8 name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Hidden entries start with a dot
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Read-only view of a course tree
pub trait ContentSource {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Check if `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List the direct children of a directory, in no particular order
    fn list_dir(&self, path: &Path) -> io::Result<Vec<Entry>>;

    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl ContentSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();

        for entry in std::fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let entry_path = entry.path();
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!("Skipping non-UTF-8 name in {}: {:?}", path.display(), raw);
                    continue;
                }
            };

            let kind = if entry_path.is_dir() {
                EntryKind::Dir
            } else if entry_path.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };

            entries.push(Entry {
                name,
                path: entry_path,
                kind,
            });
        }

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Dir,
    /// Directory whose listing always fails
    Sealed,
    File(Vec<u8>),
}

/// In-memory tree keyed by absolute-looking paths
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all of its ancestors
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
        self
    }

    /// Add a directory that exists but cannot be listed
    pub fn add_sealed_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        self.add_dir(path);
        self.nodes.insert(path.to_path_buf(), Node::Sealed);
        self
    }

    /// Add a file with the given contents, creating parent directories
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
        self
    }
}

impl ContentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.get(path), Some(Node::Dir | Node::Sealed))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<Entry>> {
        match self.nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::Sealed) => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("Permission denied: {}", path.display()),
                ))
            }
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Not a directory: {}", path.display()),
                ))
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No such directory: {}", path.display()),
                ))
            }
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_str()?.to_string();
                let kind = match node {
                    Node::Dir | Node::Sealed => EntryKind::Dir,
                    Node::File(_) => EntryKind::File,
                };
                Some(Entry {
                    name,
                    path: child.clone(),
                    kind,
                })
            })
            .collect();

        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.nodes.get(path) {
            Some(Node::File(bytes)) => String::from_utf8(bytes.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(Node::Dir | Node::Sealed) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Is a directory: {}", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )),
        }
    }
}
