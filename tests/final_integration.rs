//! End-to-end scenario: a fresh checkout goes through eleven successful
//! builds, stamping its descriptor each time.
//!
//! Run with tracing output:
//!   RUST_LOG=debug cargo test --test final_integration -- --nocapture

mod common;

use buildstamp::filter::{filter_resources, version_vars, FilterConfig};
use buildstamp::hook::{finalize, Phase};
use buildstamp::VersionRecord;
use common::{create_fixture, temp_counter, version_file};
use std::collections::HashSet;
use std::fs;
use tracing::{info, span, Level};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_sequence_from_absent_file() {
    init_tracing();
    let _span = span!(Level::INFO, "sequence_test").entered();

    let (tmp, counter) = temp_counter();
    assert_eq!(counter.read().to_string(), "1.0.0");

    let first = counter.advance().unwrap();
    assert_eq!(first, VersionRecord::new(1, 0, 1));
    let text = fs::read_to_string(version_file(&tmp)).unwrap();
    assert!(text.contains("major=1\nminor=0\nbuild=1\n"), "{text}");
    assert_eq!(counter.read().to_string(), "1.0.1");

    let mut seen = vec![counter.read().to_string()];
    for _ in 0..9 {
        let next = counter.advance().unwrap();
        info!(version = %next, "advanced");
        seen.push(next.to_string());
    }

    assert_eq!(
        seen,
        vec![
            "1.0.1", "1.0.2", "1.0.3", "1.0.4", "1.0.5", "1.0.6", "1.0.7", "1.0.8", "1.0.9",
            "1.1.0"
        ]
    );
    assert_eq!(counter.read(), VersionRecord::new(1, 1, 0));
}

#[test]
fn test_full_pipeline_labels_each_artifact() {
    init_tracing();
    let _span = span!(Level::INFO, "pipeline_test").entered();

    let (_tmp, counter) = temp_counter();
    let resources = create_fixture(&[("plugin.yml", "name: Demo\nversion: ${version}\n")]);
    let out_root = tempfile::TempDir::new().unwrap();
    let config = FilterConfig::new(&[]);

    let mut labels = Vec::new();
    for run in 0..11 {
        // Label the artifact with the current version.
        let version = counter.read().to_string();
        let out = out_root.path().join(format!("run{run:02}"));
        filter_resources(resources.path(), &out, &config, &version_vars(&version)).unwrap();
        let stamped = fs::read_to_string(out.join("plugin.yml")).unwrap();
        assert_eq!(stamped, format!("name: Demo\nversion: {version}\n"));
        labels.push(version);

        // Full build: packaging defers, the build phase advances.
        assert!(finalize(&counter, Phase::Package, true).unwrap().is_none());
        assert!(finalize(&counter, Phase::Build, true).unwrap().is_some());
    }

    assert_eq!(labels.first().map(String::as_str), Some("1.0.0"));
    assert_eq!(labels[9], "1.0.9");
    assert_eq!(labels[10], "1.1.0");
    assert_eq!(counter.read().to_string(), "1.1.1");

    // Every artifact got a distinct label.
    let unique: HashSet<&String> = labels.iter().collect();
    assert_eq!(unique.len(), labels.len());
}
