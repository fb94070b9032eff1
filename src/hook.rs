//! When a build pipeline should advance the counter.
//!
//! A full `build` always advances as its last step. A narrower `package`
//! invocation advances only when no full build was requested in the same
//! invocation, otherwise the build step would advance a second time. The flag
//! records what was requested, not what finished.

use crate::counter::VersionCounter;
use crate::error::Result;
use crate::record::VersionRecord;
use crate::store::VersionStore;
use std::fmt;
use tracing::debug;

/// Pipeline step that finished and may trigger an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Phase {
    /// The full build lifecycle.
    Build,
    /// Packaging only.
    #[value(alias = "jar")]
    Package,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Build => "build",
            Phase::Package => "package",
        })
    }
}

pub fn should_advance(phase: Phase, full_build_requested: bool) -> bool {
    match phase {
        Phase::Build => true,
        Phase::Package => !full_build_requested,
    }
}

/// Finalization step run after `phase` succeeded. Returns the persisted
/// next version, or `None` when this phase leaves the counter alone.
pub fn finalize<S: VersionStore>(
    counter: &VersionCounter<S>,
    phase: Phase,
    full_build_requested: bool,
) -> Result<Option<VersionRecord>> {
    if !should_advance(phase, full_build_requested) {
        debug!(%phase, "full build requested, leaving advance to the build phase");
        return Ok(None);
    }
    let next = counter.advance()?;
    debug!(%phase, version = %next, "advanced after phase");
    Ok(Some(next))
}
