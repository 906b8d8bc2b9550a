//! Virtual file tree
//!
//! The migration never touches the filesystem directly; it reads and writes
//! workspace-relative paths through a [`FileTree`]. [`MemoryTree`] backs
//! tests and dry runs, [`FsTree`] a workspace on disk.

use crate::error::TreeError;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Workspace-relative file access
pub trait FileTree {
    /// Whether a file exists at `path`
    fn exists(&self, path: &str) -> bool;

    /// Read `path`, `None` if it does not exist
    ///
    /// # Errors
    /// Returns `TreeError` when the file exists but cannot be read as UTF-8.
    fn read(&self, path: &str) -> Result<Option<String>, TreeError>;

    /// Create or overwrite `path`
    ///
    /// # Errors
    /// Returns `TreeError::Io` when the write fails.
    fn write(&mut self, path: &str, contents: &str) -> Result<(), TreeError>;
}

/// Join a project root and a file name into a workspace-relative path
#[must_use]
pub fn join_path(root: &str, name: &str) -> String {
    let root = root.trim_end_matches('/');
    if root.is_empty() || root == "." {
        name.to_string()
    } else {
        format!("{root}/{name}")
    }
}

fn normalize_key(path: &str) -> String {
    path.trim_start_matches("./").replace('\\', "/")
}

/// In-memory file tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTree {
    files: IndexMap<String, String>,
}

impl MemoryTree {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a file
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(normalize_key(path), contents.to_string());
        self
    }

    /// Contents of `path` without the `Result` wrapper
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(&normalize_key(path)).map(String::as_str)
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl FileTree for MemoryTree {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&normalize_key(path))
    }

    fn read(&self, path: &str) -> Result<Option<String>, TreeError> {
        Ok(self.get(path).map(str::to_string))
    }

    fn write(&mut self, path: &str, contents: &str) -> Result<(), TreeError> {
        self.files.insert(normalize_key(path), contents.to_string());
        Ok(())
    }
}

/// File tree rooted at a workspace directory on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTree {
    root: PathBuf,
}

impl FsTree {
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(normalize_key(path))
    }
}

impl FileTree for FsTree {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn read(&self, path: &str) -> Result<Option<String>, TreeError> {
        let full = self.resolve(path);
        match std::fs::read(&full) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| TreeError::NotUtf8 { path: full }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TreeError::io_error(full, e)),
        }
    }

    fn write(&mut self, path: &str, contents: &str) -> Result<(), TreeError> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TreeError::io_error(parent, e))?;
        }
        std::fs::write(&full, contents).map_err(|e| TreeError::io_error(full, e))
    }
}
