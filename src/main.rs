#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use buildstamp::cli::{Args, Command};
use buildstamp::filter::{filter_resources, version_vars, FilterConfig};
use buildstamp::{hook, logging, FileStore, VersionCounter, VersionRecord};
use clap::Parser;
use tracing::info;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("buildstamp: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init(args.verbose, args.quiet);

    let store = FileStore::new(args.store_path());
    let counter = VersionCounter::new(store);

    match &args.command {
        Command::Show => {
            println!("{}", counter.read());
        }
        Command::Advance => {
            let next = counter.advance().context("failed to advance version")?;
            report_next(&next, args.quiet);
            println!("{next}");
        }
        Command::Finalize {
            phase,
            full_build_requested,
        } => {
            let advanced = hook::finalize(&counter, *phase, *full_build_requested)
                .with_context(|| format!("failed to finalize {phase} phase"))?;
            if let Some(next) = advanced {
                report_next(&next, args.quiet);
                println!("{next}");
            }
        }
        Command::Filter {
            src,
            dest,
            patterns,
        } => {
            let version = counter.read().to_string();
            let config = FilterConfig::new(patterns);
            let report = filter_resources(src, dest, &config, &version_vars(&version))
                .with_context(|| format!("failed to filter {}", src.display()))?;
            info!(
                version = %version,
                expanded = report.expanded,
                copied = report.copied,
                "resources stamped into {}",
                dest.display()
            );
        }
    }

    Ok(())
}

/// Status line on stderr after every advance, so stdout carries only the
/// version for scripts.
fn report_next(next: &VersionRecord, quiet: bool) {
    if !quiet {
        eprintln!("Version file updated for next build: {next}");
    }
}
