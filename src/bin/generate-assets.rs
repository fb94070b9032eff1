#![forbid(unsafe_code)]

//! Writes shell completions and the man page for `buildstamp`.
//!
//! Usage: `generate-assets [OUT_DIR]` (default: `dist`).

use anyhow::Context;
use buildstamp::cli::write_assets;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));

    let written = write_assets(&out_dir)
        .with_context(|| format!("{}: failed to write assets", out_dir.display()))?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
