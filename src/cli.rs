use crate::hook::Phase;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Storage file used when neither `--file` nor `BUILDSTAMP_FILE` is set.
pub const DEFAULT_FILE: &str = "version.properties";

/// Environment variable consulted when `--file` is absent.
pub const FILE_ENV: &str = "BUILDSTAMP_FILE";

/// Shells that get a completion script from [`write_assets`].
pub const COMPLETION_SHELLS: [Shell; 4] =
    [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell];

const EXAMPLES: &str = "\
Examples:
  buildstamp show
  buildstamp filter src/main/resources build/resources
  buildstamp finalize --phase build
  buildstamp -f plugin/version.properties finalize --phase package --full-build-requested";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "buildstamp",
    version,
    about = "Auto-incrementing build version counter",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Version properties file (default: version.properties)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current version
    Show,

    /// Advance the counter and print the new version
    Advance,

    /// Advance after a successful pipeline phase, if the phase calls for it
    Finalize {
        /// Phase that just finished
        #[arg(long = "phase", value_enum)]
        phase: Phase,

        /// A full build was requested in the same invocation
        #[arg(long = "full-build-requested")]
        full_build_requested: bool,
    },

    /// Copy a resources directory, stamping the version into matching files
    Filter {
        /// Source resources directory
        src: PathBuf,

        /// Destination directory
        dest: PathBuf,

        /// Glob patterns of files to expand (repeatable, default: plugin.yml)
        #[arg(short = 'p', long = "pattern", action = clap::ArgAction::Append)]
        patterns: Vec<String>,
    },
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        if self.file.is_none() {
            self.file = Some(match std::env::var_os(FILE_ENV) {
                Some(v) if !v.is_empty() => PathBuf::from(v),
                _ => PathBuf::from(DEFAULT_FILE),
            });
        }
        if let Command::Filter { patterns, .. } = &mut self.command {
            if patterns.is_empty() {
                *patterns = crate::filter::DEFAULT_PATTERNS
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
            }
        }
        self
    }

    /// Resolved storage path. Call after [`Args::validated`].
    pub fn store_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
    }
}

/// Write shell completions to `<out_dir>/completions` and the man page to
/// `<out_dir>/man/buildstamp.1`. Returns every file written.
pub fn write_assets(out_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&completions_dir)?;
    fs::create_dir_all(&man_dir)?;

    let mut written = Vec::new();
    for shell in COMPLETION_SHELLS {
        let mut cmd = Args::command();
        written.push(generate_to(shell, &mut cmd, "buildstamp", &completions_dir)?);
    }

    let mut buffer = Vec::new();
    Man::new(Args::command()).render(&mut buffer)?;
    let man_page = man_dir.join("buildstamp.1");
    fs::write(&man_page, buffer)?;
    written.push(man_page);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_write_assets_covers_every_shell_and_man_page() {
        let tmp = TempDir::new().unwrap();
        let written = write_assets(tmp.path()).unwrap();
        assert_eq!(written.len(), COMPLETION_SHELLS.len() + 1);
        assert!(written.iter().all(|p| p.is_file()), "{written:?}");

        let man = fs::read_to_string(tmp.path().join("man/buildstamp.1")).unwrap();
        assert!(man.contains("finalize"));
    }
}
