//! Top-level error types and exit codes.
//!
//! Failures fall into four classes, each with its own exit code so scripts
//! can tell them apart:
//!
//! | class    | exit code | raised when                                  |
//! |----------|-----------|----------------------------------------------|
//! | usage    | 2         | bad arguments or release manifest            |
//! | build    | 3         | the toolchain is missing or fails            |
//! | conflict | 4         | staging directory or archive already exists  |
//! | io       | 5         | any copy, move, compress or delete fails     |

use crate::bundler::{self, PipelineError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI-level operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for usage and configuration errors (matches clap's own).
pub const EXIT_USAGE: i32 = 2;
/// Exit code for build toolchain failures.
pub const EXIT_BUILD: i32 = 3;
/// Exit code for output path conflicts.
pub const EXIT_CONFLICT: i32 = 4;
/// Exit code for filesystem and other stage failures.
pub const EXIT_IO: i32 = 5;

/// Main error type for a release run
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument and configuration errors
    #[error("{0}")]
    Cli(#[from] CliError),

    /// A pipeline stage failed
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Error outside a pipeline stage, e.g. while building settings
    #[error("{0}")]
    Bundler(#[from] bundler::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// The release manifest is unreadable or invalid
    #[error("Invalid release manifest {}: {reason}", .path.display())]
    InvalidConfig {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Cli(_) => EXIT_USAGE,
            ReleaseError::Pipeline(e) => cause_exit_code(&e.cause),
            ReleaseError::Bundler(e) => cause_exit_code(e),
            ReleaseError::Io(_) => EXIT_IO,
        }
    }

    /// Stage that failed, if the error came from the pipeline.
    pub fn stage(&self) -> Option<bundler::Stage> {
        match self {
            ReleaseError::Pipeline(e) => Some(e.stage),
            _ => None,
        }
    }
}

fn cause_exit_code(cause: &bundler::Error) -> i32 {
    if cause.is_build_failure() {
        EXIT_BUILD
    } else if cause.is_conflict() {
        EXIT_CONFLICT
    } else {
        EXIT_IO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{Error, Platform, Stage};

    #[test]
    fn exit_codes_follow_error_class() {
        let build: ReleaseError = PipelineError {
            stage: Stage::Building,
            cause: Error::BuildFailed {
                command: "go build".into(),
                platform: Platform::Linux,
                code: Some(1),
            },
        }
        .into();
        assert_eq!(build.exit_code(), EXIT_BUILD);
        assert_eq!(build.stage(), Some(Stage::Building));

        let conflict: ReleaseError = PipelineError {
            stage: Stage::Idle,
            cause: Error::Conflict {
                path: "gokoban-linux-1".into(),
            },
        }
        .into();
        assert_eq!(conflict.exit_code(), EXIT_CONFLICT);

        let usage: ReleaseError = CliError::InvalidArguments {
            reason: "version cannot be empty".into(),
        }
        .into();
        assert_eq!(usage.exit_code(), EXIT_USAGE);

        let io: ReleaseError = Error::IoError(std::io::Error::other("disk full")).into();
        assert_eq!(io.exit_code(), EXIT_IO);
    }

    #[test]
    fn pipeline_errors_name_the_stage() {
        let err: ReleaseError = PipelineError {
            stage: Stage::Bundling,
            cause: Error::GenericError("libogg.dll missing".into()),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "dependency bundling stage failed: libogg.dll missing"
        );
    }
}
