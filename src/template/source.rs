//! Template source locators

use std::io;
use std::path::{Path, PathBuf};

/// Identifies where a template body comes from and how to obtain it.
///
/// Existence and readability are separate probes so the validator can report
/// the right problem; `load` is only called after validation passes.
pub trait SourceLocator: Send + Sync {
    /// Whether the source exists at all
    fn exists(&self) -> bool;

    /// Whether the source can actually be read. Only meaningful when
    /// [`exists`](Self::exists) holds.
    fn readable(&self) -> bool;

    /// Obtain the template body
    fn load(&self) -> io::Result<String>;

    /// Human-readable identification, used as the subject of validation
    /// failures
    fn describe(&self) -> String;
}

/// A template body on the filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceLocator for FileSource {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    // Readable means a regular file that can actually be opened; a
    // directory or an open failure both fail this probe.
    fn readable(&self) -> bool {
        self.path.is_file() && std::fs::File::open(&self.path).is_ok()
    }

    fn load(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A template body held in memory, mainly for embedded and test templates
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    body: String,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl SourceLocator for InMemorySource {
    fn exists(&self) -> bool {
        true
    }

    fn readable(&self) -> bool {
        true
    }

    fn load(&self) -> io::Result<String> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
