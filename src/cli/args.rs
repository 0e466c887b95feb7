//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! that runs before any side effects.

use crate::bundler::{Platform, validate_version};
use crate::error::{CliError, Result};
use clap::Parser;
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Release packager for Gokoban
#[derive(Parser, Debug)]
#[command(
    name = "gokoban-release",
    version,
    about = "Builds Gokoban and packages it into a release zip",
    long_about = "Builds the game, stages its assets and platform libraries, and compresses everything into <product>-<os>-<version>.zip in the project root.

Usage:
  gokoban-release win 1.2.0
  gokoban-release linux 1.2.0 --project-root ../gokoban

Exit code 0 = archive guaranteed to exist; 2 usage, 3 build, 4 conflict, 5 IO failure."
)]
pub struct Args {
    /// Operating system being built for
    #[arg(value_enum, value_name = "OS")]
    pub os: Platform,

    /// Version of the game, used verbatim in the output name
    #[arg(id = "release_version", value_name = "VERSION", value_parser = parse_version)]
    pub version: String,

    /// Project root containing the game sources and assets
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_root: PathBuf,

    /// Release manifest (defaults to <project root>/release.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print per-file progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_version(value: &str) -> std::result::Result<String, String> {
    validate_version(value).map(|()| value.to_string())
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_version(&self.version)?;

        if !self.project_root.is_dir() {
            return Err(format!(
                "project root {} is not a directory",
                self.project_root.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Absolute project root
    project_root: PathBuf,

    /// Explicit manifest path
    config: Option<PathBuf>,

    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl TryFrom<&Args> for RuntimeConfig {
    type Error = crate::error::ReleaseError;

    fn try_from(args: &Args) -> Result<Self> {
        args.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;

        let project_root = args.project_root.absolutize()?.into_owned();
        let config = match &args.config {
            Some(path) => Some(path.absolutize()?.into_owned()),
            None => None,
        };

        Ok(Self {
            project_root,
            config,
            output: super::OutputManager::new(args.verbose, args.quiet),
        })
    }
}

impl RuntimeConfig {
    /// Absolute project root.
    pub fn project_root(&self) -> &std::path::Path {
        &self.project_root
    }

    /// Explicit manifest path, if one was given.
    pub fn config(&self) -> Option<&std::path::Path> {
        self.config.as_deref()
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_os_and_version() {
        let args = Args::try_parse_from(["gokoban-release", "win-debug", "0.9"]).unwrap();
        assert_eq!(args.os, Platform::WindowsDebug);
        assert_eq!(args.version, "0.9");
        assert_eq!(args.project_root, PathBuf::from("."));
    }

    #[test]
    fn rejects_unknown_os() {
        let err = Args::try_parse_from(["gokoban-release", "macos", "1.0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_empty_version() {
        assert!(Args::try_parse_from(["gokoban-release", "linux", ""]).is_err());
    }

    #[test]
    fn version_flag_prints_tool_version() {
        let err = Args::try_parse_from(["gokoban-release", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn version_positional_and_flag_coexist() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn requires_both_positionals() {
        let err = Args::try_parse_from(["gokoban-release", "linux"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
