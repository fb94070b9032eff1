//! Resource filtering: copy a resources tree and stamp `${name}` / `$name`
//! placeholders into the files that match a glob set.

use crate::error::{Result, VersionError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files expanded when no pattern is given.
pub const DEFAULT_PATTERNS: &[&str] = &["plugin.yml"];

/// Which files get placeholder expansion.
pub struct FilterConfig {
    pub patterns: GlobSet,
}

impl FilterConfig {
    pub fn new(user_patterns: &[String]) -> Self {
        Self {
            patterns: build_filter_set(user_patterns),
        }
    }

    fn matches(&self, relative: &Path) -> bool {
        self.patterns.is_match(relative)
            || relative
                .file_name()
                .is_some_and(|name| self.patterns.is_match(Path::new(name)))
    }
}

/// Outcome of a [`filter_resources`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Files written with placeholders expanded.
    pub expanded: usize,
    /// Files copied byte-for-byte.
    pub copied: usize,
}

/// Build a GlobSet from user patterns, or [`DEFAULT_PATTERNS`] when none are
/// given. Invalid patterns are skipped with a warning.
pub fn build_filter_set(user_patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    let mut invalid = Vec::new();

    let patterns: Vec<String> = if user_patterns.is_empty() {
        DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
        user_patterns.to_vec()
    };

    for pattern in &patterns {
        match Glob::new(pattern) {
            Ok(g) => {
                builder.add(g);
            }
            Err(_) => invalid.push(pattern.clone()),
        }
    }
    if !invalid.is_empty() {
        warn!(?invalid, "invalid filter pattern(s), skipped");
    }
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "failed to build filter set");
        GlobSet::empty()
    })
}

/// Replace every `${name}` and bare `$name` whose name is in `vars`. Unknown
/// names, unterminated `${` and a `$` not followed by an identifier are left
/// as written.
pub fn expand(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('$') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(body) = after.strip_prefix('{') {
            match body.find('}') {
                Some(end) => {
                    match vars.get(&body[..end]) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 1]),
                    }
                    rest = &body[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
            continue;
        }

        let len = identifier_len(after);
        match vars.get(&after[..len]) {
            Some(value) if len > 0 => {
                out.push_str(value);
                rest = &after[len..];
            }
            _ => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte length of the identifier at the start of `s`, 0 if there is none.
fn identifier_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return 0,
    }
    chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Copy `src` into `dest`, expanding placeholders in matching files.
pub fn filter_resources(
    src: &Path,
    dest: &Path,
    config: &FilterConfig,
    vars: &HashMap<&str, String>,
) -> Result<FilterReport> {
    if !src.is_dir() {
        return Err(VersionError::NotADirectory(src.to_path_buf()));
    }

    let mut report = FilterReport::default();
    let walker = WalkDir::new(src).sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| src.to_path_buf());
            VersionError::Resource {
                path,
                source: e.into(),
            }
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or_else(|_| entry.path());
        let target = dest.join(relative);
        let io_err = |source: std::io::Error| VersionError::Resource {
            path: entry.path().to_path_buf(),
            source,
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_err)?;
            continue;
        }

        if config.matches(relative) {
            let text = fs::read_to_string(entry.path()).map_err(io_err)?;
            fs::write(&target, expand(&text, vars)).map_err(io_err)?;
            debug!(file = %relative.display(), "expanded");
            report.expanded += 1;
        } else {
            fs::copy(entry.path(), &target).map_err(io_err)?;
            report.copied += 1;
        }
    }

    Ok(report)
}

/// Variables handed to [`expand`] for a given version label.
pub fn version_vars(version: &str) -> HashMap<&'static str, String> {
    HashMap::from([("version", version.to_string())])
}
