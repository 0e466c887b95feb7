//! Release packaging library for Gokoban.
//!
//! Builds the game for one platform, assembles a self-contained staging tree
//! (assets, license, readme, executable and platform shared libraries) and
//! compresses it into a single zip archive ready for upload.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
