//! Where delimited text comes from

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves a path-like identifier to its full text content
pub trait DataSource {
    /// Read the whole content at `path`
    ///
    /// A missing source is reported as [`io::ErrorKind::NotFound`].
    fn read_to_string(&self, path: &str) -> io::Result<String>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Reads from the local file system
///
/// Relative paths are resolved against the base directory when one is set,
/// so a batch file can refer to data files next to it.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    base_dir: Option<PathBuf>,
}

impl FsSource {
    /// Resolve relative paths against the current working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`
    pub fn with_base_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    /// The path that `path` resolves to
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DataSource for FsSource {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(self.resolve(path))
    }
}

/// In-memory sources keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the content for `path`
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }
}

impl DataSource for MemorySource {
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such source: {}", path))
        })
    }
}
