#![allow(dead_code)]

use buildstamp::{FileStore, VersionCounter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const VERSION_FILE: &str = "version.properties";

/// A counter backed by `version.properties` inside a fresh temp dir.
pub fn temp_counter() -> (TempDir, VersionCounter<FileStore>) {
    let tmp = TempDir::new().unwrap();
    let counter = VersionCounter::new(FileStore::new(tmp.path().join(VERSION_FILE)));
    (tmp, counter)
}

/// Same as [`temp_counter`], with the version file pre-seeded.
pub fn seeded_counter(contents: &str) -> (TempDir, VersionCounter<FileStore>) {
    let (tmp, counter) = temp_counter();
    fs::write(tmp.path().join(VERSION_FILE), contents).unwrap();
    (tmp, counter)
}

pub fn version_file(tmp: &TempDir) -> PathBuf {
    tmp.path().join(VERSION_FILE)
}

/// Create files from `(relative path, contents)` pairs. Paths ending with
/// '/' create directories.
pub fn create_fixture(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (p, contents) in files {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, contents).unwrap();
        }
    }
    tmp
}
