#![forbid(unsafe_code)]
//! buildstamp — an auto-incrementing build version counter backed by a
//! property file, with resource stamping for packaged descriptors.

pub mod cli;
pub mod counter;
pub mod error;
pub mod filter;
pub mod hook;
pub mod logging;
pub mod properties;
pub mod record;
pub mod store;

pub use counter::VersionCounter;
pub use error::VersionError;
pub use record::VersionRecord;
pub use store::{FileStore, MemoryStore, VersionStore};
