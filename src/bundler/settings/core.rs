//! Core Settings struct and implementations.

use super::{AssetFilter, AssetSource, Platform, PlatformProfile};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Command used to build the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildCommand {
    /// Program to run, looked up in `PATH`.
    pub program: String,
    /// Arguments passed before the platform build flags.
    pub args: Vec<String>,
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: "go".into(),
            args: vec!["build".into()],
        }
    }
}

/// Main settings for packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which starts
/// from the built-in Gokoban layout.
///
/// # Examples
///
/// ```no_run
/// use gokoban_release::bundler::{Platform, SettingsBuilder};
///
/// # fn example() -> gokoban_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_root("..").build()?;
///
/// assert_eq!(settings.product_name(), "gokoban");
/// assert_eq!(
///     settings.executable_name(Platform::WindowsRelease),
///     "gokoban.exe"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Product name, first part of every output name.
    product_name: String,

    /// Directory holding sources, assets and outputs.
    project_root: PathBuf,

    /// Asset trees copied into the staging root.
    assets: Vec<AssetSource>,

    /// Flat files always copied into the staging root.
    include_files: Vec<PathBuf>,

    /// Design-file exclusion applied to filtered assets.
    filter: AssetFilter,

    /// Build toolchain invocation.
    build_command: BuildCommand,

    /// Per-platform lookup table.
    profiles: BTreeMap<Platform, PlatformProfile>,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the configured asset sources in copy order.
    pub fn assets(&self) -> &[AssetSource] {
        &self.assets
    }

    /// Returns the always-included flat files.
    pub fn include_files(&self) -> &[PathBuf] {
        &self.include_files
    }

    /// Returns the design-file filter.
    pub fn filter(&self) -> &AssetFilter {
        &self.filter
    }

    /// Returns the build command.
    pub fn build_command(&self) -> &BuildCommand {
        &self.build_command
    }

    /// Returns the profile for `platform`.
    pub fn profile(&self, platform: Platform) -> &PlatformProfile {
        // SettingsBuilder::build fills every platform.
        &self.profiles[&platform]
    }

    /// File name the toolchain writes the executable to.
    pub fn executable_name(&self, platform: Platform) -> String {
        format!(
            "{}{}",
            self.product_name,
            self.profile(platform).executable_suffix
        )
    }

    /// Full path of the freshly built executable.
    pub fn executable_path(&self, platform: Platform) -> PathBuf {
        self.project_root.join(self.executable_name(platform))
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        product_name: String,
        project_root: PathBuf,
        assets: Vec<AssetSource>,
        include_files: Vec<PathBuf>,
        filter: AssetFilter,
        build_command: BuildCommand,
        profiles: BTreeMap<Platform, PlatformProfile>,
    ) -> Self {
        Self {
            product_name,
            project_root,
            assets,
            include_files,
            filter,
            build_command,
            profiles,
        }
    }
}
