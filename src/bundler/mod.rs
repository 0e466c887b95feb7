//! Release packaging pipeline.
//!
//! Turns a built game into `<product>-<platform>-<version>.zip`:
//!
//! - [`builder`] - orchestration and the build toolchain step
//! - [`staging`] - staging tree assembly, asset filtering, shared libraries
//! - [`archive`] - zip creation and staging cleanup
//! - [`settings`] - release target, asset layout and per-platform table
//!
//! # Example
//!
//! ```no_run
//! use gokoban_release::bundler::{Bundler, Platform, ReleaseTarget, SettingsBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsBuilder::new().project_root("..").build()?;
//! let target = ReleaseTarget::new(Platform::WindowsRelease, "1.2.0")?;
//!
//! let artifact = Bundler::new(settings, target).bundle().await?;
//! println!("Created: {}", artifact.path.display());
//! println!("SHA256: {}", artifact.checksum);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod builder;
pub mod error;
pub mod settings;
pub mod staging;
pub mod utils;

use std::path::PathBuf;

pub use builder::{Bundler, BuiltExecutable, PipelineState, Stage};
pub use error::{Error, PipelineError, Result};
pub use settings::{
    AssetFilter, AssetSource, BuildCommand, FilterPolicy, Platform, PlatformProfile,
    ReleaseTarget, Settings, SettingsBuilder, validate_version,
};
pub use staging::StagingRoot;

/// The archive produced by a successful release.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Platform the archive was built for.
    pub platform: Platform,

    /// Location of the zip archive.
    pub path: PathBuf,

    /// Archive size in bytes.
    pub size: u64,

    /// Hex-encoded SHA-256 of the archive.
    pub checksum: String,

    /// Shared libraries bundled next to the executable.
    pub dependencies: Vec<String>,

    /// Staging directory that could not be removed after archiving.
    pub leftover_staging: Option<PathBuf>,
}
