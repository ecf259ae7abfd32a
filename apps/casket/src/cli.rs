//! Command line interface definition

use clap::Parser;
use casket_types::{ColorChoice, CommitRange};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::CliError;

pub const USAGE: &str = "casket [OPTIONS] <COMMIT_RANGE>";

const LONG_ABOUT: &str = "\
Audit all modified Casks in a given commit range.

Every cask added or modified in COMMIT_RANGE is audited. Downloads are verified \
only for casks whose version, sha256, url or appcast stanza changed and that do \
not use `sha256 :no_check`. Token conflicts are checked only for newly added casks.";

/// casket - audit all modified Casks in a given commit range
#[derive(Parser, Debug)]
#[command(name = "casket")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "audit all modified Casks in a given commit range")]
#[command(long_about = LONG_ABOUT)]
#[command(override_usage = USAGE)]
pub struct Cli {
    /// Commit range to audit, e.g. `main..feature`
    #[arg(value_name = "COMMIT_RANGE")]
    pub positionals: Vec<String>,

    /// Remove all cached downloads. Use with care.
    #[arg(short = 'c', long)]
    pub cleanup: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments
#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show version control commands and write debug logs
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse arguments after normalizing cleanup flag spellings.
    ///
    /// # Errors
    ///
    /// Returns clap's error for unknown options, `--help` and `--version`.
    pub fn try_parse_normalized<I>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// The single commit range given on the command line.
    ///
    /// Empty arguments are ignored.
    ///
    /// # Errors
    ///
    /// Returns a usage error unless exactly one non-empty positional was given.
    pub fn commit_range(&self) -> Result<CommitRange, CliError> {
        let mut ranges = self.positionals.iter().filter(|arg| !arg.is_empty());
        match (ranges.next(), ranges.next()) {
            (Some(range), None) => Ok(CommitRange::new(range.as_str())),
            _ => Err(CliError::InvalidArguments(format!(
                "expected exactly one commit range\n\nUsage: {USAGE}"
            ))),
        }
    }
}

/// Rewrite `-c`, `--c`, `-cleanup`, `--CLEANUP` and the like to `--cleanup`
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg.to_str().is_some_and(is_cleanup_flag) {
                OsString::from("--cleanup")
            } else {
                arg
            }
        })
        .collect()
}

fn is_cleanup_flag(arg: &str) -> bool {
    let name = arg.trim_start_matches('-');
    name.len() < arg.len() && {
        let name = name.to_ascii_lowercase();
        name == "c" || name == "cleanup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(std::iter::once("casket").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cleanup_spellings() {
        for flag in ["-c", "--c", "-cleanup", "--cleanup", "---Cleanup", "-C"] {
            assert!(is_cleanup_flag(flag), "{flag}");
        }
        for arg in ["c", "cleanup", "--clean", "-cc", "--cleanups", "-"] {
            assert!(!is_cleanup_flag(arg), "{arg}");
        }
    }

    #[test]
    fn single_range() {
        let cli = parse(&["main..feature", "-cleanup"]);
        assert!(cli.cleanup);
        assert_eq!(cli.commit_range().unwrap().as_str(), "main..feature");
    }

    #[test]
    fn empty_positionals_are_ignored() {
        let cli = parse(&["", "HEAD~3..HEAD", ""]);
        assert_eq!(cli.commit_range().unwrap().as_str(), "HEAD~3..HEAD");
        assert!(!cli.cleanup);
    }

    #[test]
    fn zero_or_two_ranges_is_a_usage_error() {
        assert!(matches!(
            parse(&[]).commit_range(),
            Err(CliError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse(&["a..b", "c..d"]).commit_range(),
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[test]
    fn global_flags() {
        let cli = parse(&["--json", "--color", "never", "--config", "/tmp/c.toml", "a..b"]);
        assert!(cli.global.json);
        assert_eq!(cli.global.color, Some(ColorChoice::Never));
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
