//! Errors surfaced by the write path and the resource filter.
//!
//! The read path has no error type: anything wrong with the stored record is
//! replaced by defaults.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    /// The backing store could not be written during `advance`.
    #[error("{location}: failed to write version file")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },

    /// A resource could not be read, created or written while filtering.
    #[error("{}: resource filtering failed", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: Not a directory", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, VersionError>;
