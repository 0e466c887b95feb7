//! Error types for packaging operations.
//!
//! [`Error`] describes what went wrong; [`PipelineError`] pairs it with the
//! pipeline [`Stage`] that was running so the operator knows where to look.

use super::builder::Stage;
use super::settings::Platform;
use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the packaging stages.
#[derive(Error, Debug)]
pub enum Error {
    /// The build toolchain ran and reported failure.
    #[error("build toolchain `{command}` failed for {platform} (exit code: {code:?})")]
    BuildFailed {
        /// Command line that was run
        command: String,
        /// Platform being built
        platform: Platform,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// The build toolchain is not installed.
    #[error("build toolchain `{program}` not found in PATH")]
    ToolchainNotFound {
        /// Program that was looked up
        program: String,
    },

    /// A command could not be started.
    #[error("failed to execute `{command}`: {error}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying spawn error
        #[source]
        error: io::Error,
    },

    /// The toolchain exited successfully but left no executable behind.
    #[error("build toolchain did not produce {}", .path.display())]
    MissingExecutable {
        /// Where the executable was expected
        path: PathBuf,
    },

    /// An output path already exists and would be overwritten.
    #[error("{} already exists; remove it before packaging this version again", .path.display())]
    Conflict {
        /// Conflicting path
        path: PathBuf,
    },

    /// A filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// The zip writer failed.
    #[error("writing archive {}: {error}", .path.display())]
    Archive {
        /// Archive being written
        path: PathBuf,
        /// Underlying zip error
        #[source]
        error: zip::result::ZipError,
    },

    /// Directory traversal failed.
    #[error("walking directory tree: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Plain IO error without path context.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// The pipeline is single-shot and has already run.
    #[error("packaging pipeline already ran (state: {0})")]
    AlreadyRan(String),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Whether this is a conflict with an existing output path.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    /// Whether the build toolchain is to blame.
    pub fn is_build_failure(&self) -> bool {
        matches!(
            self,
            Error::BuildFailed { .. }
                | Error::ToolchainNotFound { .. }
                | Error::CommandFailed { .. }
                | Error::MissingExecutable { .. }
        )
    }
}

/// A stage failure: the pipeline's terminal `Failed(stage, cause)` state.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {cause}")]
pub struct PipelineError {
    /// Stage that was running when the failure happened
    pub stage: Stage,
    /// What went wrong
    #[source]
    pub cause: Error,
}

/// Attaches path context to filesystem errors.
pub trait ErrorExt<T> {
    /// Wraps the error with a description of the operation and the path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Converts options and foreign errors into [`Error::GenericError`].
pub trait Context<T> {
    /// Adds a message describing what was expected.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: std::error::Error> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
