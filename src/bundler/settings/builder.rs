//! Builder for constructing Settings.

use super::{AssetFilter, AssetSource, BuildCommand, Platform, PlatformProfile, Settings};
use crate::{bail, bundler::error::Context};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Product name used when none is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "gokoban";

/// Builder for constructing [`Settings`].
///
/// Starts from the built-in Gokoban layout; every setter replaces one part
/// of it.
///
/// # Examples
///
/// ```no_run
/// use gokoban_release::bundler::{
///     AssetFilter, AssetSource, FilterPolicy, Platform, SettingsBuilder,
/// };
///
/// # fn example() -> gokoban_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/gokoban")
///     .assets(vec![
///         AssetSource::new("levels", FilterPolicy::CopyAll),
///         AssetSource::new("img", FilterPolicy::ExcludeDesignFiles),
///     ])
///     .filter(AssetFilter::new(["xcf", "blend", "psd"]))
///     .build()?;
///
/// assert_eq!(settings.assets().len(), 2);
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    product_name: String,
    project_root: Option<PathBuf>,
    assets: Vec<AssetSource>,
    include_files: Vec<PathBuf>,
    filter: AssetFilter,
    build_command: BuildCommand,
    profiles: BTreeMap<Platform, PlatformProfile>,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            project_root: None,
            assets: AssetSource::defaults(),
            include_files: vec![PathBuf::from("LICENSE"), PathBuf::from("README.md")],
            filter: AssetFilter::default(),
            build_command: BuildCommand::default(),
            profiles: Platform::ALL
                .into_iter()
                .map(|p| (p, PlatformProfile::defaults_for(p)))
                .collect(),
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the product name.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Replaces the asset sources.
    pub fn assets(mut self, assets: Vec<AssetSource>) -> Self {
        self.assets = assets;
        self
    }

    /// Replaces the always-included flat files.
    pub fn include_files(mut self, files: Vec<PathBuf>) -> Self {
        self.include_files = files;
        self
    }

    /// Replaces the design-file filter.
    pub fn filter(mut self, filter: AssetFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the build command.
    pub fn build_command(mut self, command: BuildCommand) -> Self {
        self.build_command = command;
        self
    }

    /// Replaces the profile for one platform.
    pub fn profile(mut self, platform: Platform, profile: PlatformProfile) -> Self {
        self.profiles.insert(platform, profile);
        self
    }

    /// Mutable access to a platform profile, for partial overrides.
    pub fn profile_mut(&mut self, platform: Platform) -> &mut PlatformProfile {
        self.profiles
            .entry(platform)
            .or_insert_with(|| PlatformProfile::defaults_for(platform))
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_root` is missing, the product name or
    /// build program is empty, or an asset destination escapes the staging root.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let project_root = self.project_root.context("project_root is required")?;

        if self.product_name.trim().is_empty() {
            bail!("product name cannot be empty");
        }
        if self.build_command.program.trim().is_empty() {
            bail!("build program cannot be empty");
        }
        for asset in &self.assets {
            if asset.dest.is_absolute()
                || asset
                    .dest
                    .components()
                    .any(|c| matches!(c, std::path::Component::ParentDir))
            {
                bail!(
                    "asset destination {} must stay inside the staging directory",
                    asset.dest.display()
                );
            }
        }

        Ok(Settings::new(
            self.product_name,
            project_root,
            self.assets,
            self.include_files,
            self.filter,
            self.build_command,
            self.profiles,
        ))
    }
}
