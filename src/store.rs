//! Backing stores for the version record.

use crate::error::{Result, VersionError};
use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Where the version record lives between builds.
pub trait VersionStore {
    /// Raw contents, or `None` when absent or unreadable.
    fn load(&self) -> Option<String>;

    /// Replace the stored contents.
    fn save(&self, contents: &str) -> Result<()>;

    /// Identity used in diagnostics.
    fn location(&self) -> String;
}

/// A property file on disk. Writes go through a sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "version.properties".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let result = (|| {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
            return result;
        }

        if let Some(parent) = self.path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }
        Ok(())
    }
}

impl VersionStore for FileStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "version file not loaded");
                None
            }
        }
    }

    fn save(&self, contents: &str) -> Result<()> {
        trace!(path = %self.path.display(), bytes = contents.len(), "writing version file");
        self.write_atomic(contents)
            .map_err(|source| VersionError::Write {
                location: self.location(),
                source,
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
        }
    }

    /// Current contents, if anything has been stored.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl VersionStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.contents()
    }

    fn save(&self, contents: &str) -> Result<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}

impl<S: VersionStore + ?Sized> VersionStore for &S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, contents: &str) -> Result<()> {
        (**self).save(contents)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
