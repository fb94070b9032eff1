//! The version counter: tolerant reads and carry-aware advances.

use crate::error::Result;
use crate::properties::Properties;
use crate::record::VersionRecord;
use crate::store::VersionStore;
use tracing::{debug, info, warn};

pub const MAJOR_KEY: &str = "major";
pub const MINOR_KEY: &str = "minor";
pub const BUILD_KEY: &str = "build";

/// Header written on every advance.
pub const STORE_COMMENT: &str = "Auto-incremented on build. Build 0-9 then minor bumps.";

/// Reads and advances a [`VersionRecord`] held in a [`VersionStore`].
pub struct VersionCounter<S> {
    store: S,
}

impl<S: VersionStore> VersionCounter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current record. Never fails: an absent store yields the default record
    /// and each missing or malformed field falls back on its own.
    pub fn read(&self) -> VersionRecord {
        record_from(&self.load_properties())
    }

    /// Persist the next record and return it.
    ///
    /// Keys other than `major`, `minor` and `build` are kept after the
    /// version keys. Write failures are returned, never swallowed.
    pub fn advance(&self) -> Result<VersionRecord> {
        let current = self.load_properties();
        let next = record_from(&current).next();

        let mut props = Properties::new();
        props.set(MAJOR_KEY, next.major.to_string());
        props.set(MINOR_KEY, next.minor.to_string());
        props.set(BUILD_KEY, next.build.to_string());
        for (key, value) in current.iter() {
            if !is_version_key(key) {
                props.set(key, value);
            }
        }

        self.store.save(&props.format(Some(STORE_COMMENT)))?;
        info!(location = %self.store.location(), version = %next, "version advanced");
        Ok(next)
    }

    fn load_properties(&self) -> Properties {
        match self.store.load() {
            Some(text) => Properties::parse(&text),
            None => {
                debug!(location = %self.store.location(), "no stored version, using defaults");
                Properties::new()
            }
        }
    }
}

fn is_version_key(key: &str) -> bool {
    key == MAJOR_KEY || key == MINOR_KEY || key == BUILD_KEY
}

fn record_from(props: &Properties) -> VersionRecord {
    let defaults = VersionRecord::DEFAULT;
    VersionRecord {
        major: parse_or_default(props, MAJOR_KEY, defaults.major),
        minor: parse_or_default(props, MINOR_KEY, defaults.minor),
        build: parse_or_default(props, BUILD_KEY, defaults.build),
    }
}

/// Integer value of `key`, or `default` when the key is missing or is not a
/// non-negative 32-bit signed integer. Surrounding whitespace is ignored.
pub fn parse_or_default(props: &Properties, key: &str, default: u32) -> u32 {
    match props.get(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<i32>().map(u32::try_from) {
            Ok(Ok(value)) => value,
            _ => {
                warn!(key, value = raw, default, "unparseable version field, using default");
                default
            }
        },
    }
}
