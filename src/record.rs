//! The `(major, minor, build)` triple and its carry rule.

use std::fmt;

/// Highest value `build` may hold in persisted state.
pub const BUILD_MAX: u32 = 9;

/// Largest value any field can persist and still read back.
pub const FIELD_MAX: u32 = i32::MAX as u32;

/// A three-part build version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRecord {
    pub major: u32,
    pub minor: u32,
    /// Always in `0..=BUILD_MAX` once persisted.
    pub build: u32,
}

impl VersionRecord {
    /// Version used when nothing has been persisted yet.
    pub const DEFAULT: VersionRecord = VersionRecord {
        major: 1,
        minor: 0,
        build: 0,
    };

    pub fn new(major: u32, minor: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            build,
        }
    }

    /// The record that follows this one.
    ///
    /// `build` is incremented; once it passes [`BUILD_MAX`] it rolls back to 0
    /// and `minor` is incremented, stopping at [`FIELD_MAX`]. `major` is never
    /// touched.
    pub fn next(self) -> Self {
        let mut next = self;
        next.build = next.build.saturating_add(1);
        if next.build > BUILD_MAX {
            next.build = 0;
            next.minor = next.minor.saturating_add(1).min(FIELD_MAX);
        }
        next
    }
}

impl Default for VersionRecord {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)
    }
}
