//! Release manifest (`release.toml`) loading.
//!
//! Every section is optional; anything left out keeps the built-in Gokoban
//! layout from [`SettingsBuilder`].

use crate::bundler::{
    AssetFilter, AssetSource, BuildCommand, FilterPolicy, Platform, Settings, SettingsBuilder,
};
use crate::error::{CliError, ReleaseError, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// File name looked up in the project root when no manifest is given.
pub const MANIFEST_FILE_NAME: &str = "release.toml";

/// Parsed `release.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseManifest {
    /// `[package]` section
    #[serde(default)]
    pub package: PackageSection,

    /// `[build]` section
    #[serde(default)]
    pub build: Option<BuildSection>,

    /// `[filter]` section
    #[serde(default)]
    pub filter: Option<FilterSection>,

    /// `[[assets]]` entries; replaces the whole default list when present
    #[serde(default)]
    pub assets: Option<Vec<AssetSection>>,

    /// `[platforms.<name>]` sections keyed by CLI platform name
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformSection>,
}

/// `[package]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Product name used in output names
    pub name: Option<String>,

    /// Flat files copied into the staging root
    pub include: Option<Vec<PathBuf>>,
}

/// `[build]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    /// Toolchain program
    pub program: String,

    /// Arguments before the platform flags
    #[serde(default)]
    pub args: Vec<String>,
}

/// `[filter]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Extensions of design-tool files that must not ship
    pub exclude_extensions: Vec<String>,
}

/// One `[[assets]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetSection {
    /// Source directory relative to the project root
    pub source: PathBuf,

    /// Destination inside the staging root; defaults to `source`
    pub dest: Option<PathBuf>,

    /// Whether design-tool files are excluded
    #[serde(default)]
    pub filter: bool,
}

/// `[platforms.<name>]`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformSection {
    /// Flags appended to the build command
    pub build_flags: Option<Vec<String>>,

    /// Folder holding the shared libraries
    pub dependency_dir: Option<PathBuf>,

    /// Shared libraries copied next to the executable
    pub dependencies: Option<Vec<String>>,
}

impl ReleaseManifest {
    /// Parses manifest text; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            ReleaseError::Cli(CliError::InvalidConfig {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })
        })
    }

    /// Applies every present section on top of `builder`.
    pub fn apply(self, mut builder: SettingsBuilder, origin: &Path) -> Result<SettingsBuilder> {
        if let Some(name) = self.package.name {
            builder = builder.product_name(name);
        }
        if let Some(include) = self.package.include {
            builder = builder.include_files(include);
        }
        if let Some(build) = self.build {
            builder = builder.build_command(BuildCommand {
                program: build.program,
                args: build.args,
            });
        }
        if let Some(filter) = self.filter {
            builder = builder.filter(AssetFilter::new(filter.exclude_extensions));
        }
        if let Some(assets) = self.assets {
            builder = builder.assets(
                assets
                    .into_iter()
                    .map(|asset| {
                        let policy = if asset.filter {
                            FilterPolicy::ExcludeDesignFiles
                        } else {
                            FilterPolicy::CopyAll
                        };
                        let dest = asset.dest.unwrap_or_else(|| asset.source.clone());
                        AssetSource::with_dest(asset.source, dest, policy)
                    })
                    .collect(),
            );
        }

        for (name, section) in self.platforms {
            let platform: Platform = name.parse().map_err(|reason| {
                ReleaseError::Cli(CliError::InvalidConfig {
                    path: origin.to_path_buf(),
                    reason,
                })
            })?;
            let profile = builder.profile_mut(platform);
            if let Some(flags) = section.build_flags {
                profile.build_flags = flags;
            }
            if let Some(dir) = section.dependency_dir {
                profile.dependency_dir = dir;
            }
            if let Some(dependencies) = section.dependencies {
                profile.dependencies = dependencies;
            }
        }

        Ok(builder)
    }
}

/// Loads the release manifest if there is one.
///
/// An explicit `config` path must exist. Without one, `release.toml` in the
/// project root is used when present and the built-in layout otherwise.
pub fn load_manifest(
    project_root: &Path,
    config: Option<&Path>,
) -> Result<Option<(PathBuf, ReleaseManifest)>> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => {
            let default = project_root.join(MANIFEST_FILE_NAME);
            if !default.is_file() {
                log::debug!("No {} in {}", MANIFEST_FILE_NAME, project_root.display());
                return Ok(None);
            }
            default
        }
    };

    let text = std::fs::read_to_string(&path).map_err(|e| {
        ReleaseError::Cli(CliError::InvalidConfig {
            path: path.clone(),
            reason: format!("cannot read file: {e}"),
        })
    })?;
    let manifest = ReleaseManifest::parse(&text, &path)?;
    log::info!("Using release manifest {}", path.display());

    Ok(Some((path, manifest)))
}

/// Builder for `project_root` with the manifest, if any, applied.
pub fn settings_builder(project_root: &Path, config: Option<&Path>) -> Result<SettingsBuilder> {
    let builder = SettingsBuilder::new().project_root(project_root);
    match load_manifest(project_root, config)? {
        Some((path, manifest)) => manifest.apply(builder, &path),
        None => Ok(builder),
    }
}

/// Final settings for `project_root`.
///
/// Values the builder rejects (an empty name or program, an asset
/// destination outside the staging root) are reported as configuration
/// errors against the manifest that set them.
pub fn load_settings(project_root: &Path, config: Option<&Path>) -> Result<Settings> {
    let manifest = match config {
        Some(path) => path.to_path_buf(),
        None => project_root.join(MANIFEST_FILE_NAME),
    };
    settings_builder(project_root, config)?
        .build()
        .map_err(|e| {
            ReleaseError::Cli(CliError::InvalidConfig {
                path: manifest,
                reason: e.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &str) -> Result<crate::bundler::Settings> {
        let origin = Path::new("release.toml");
        let manifest = ReleaseManifest::parse(text, origin)?;
        let builder = manifest.apply(SettingsBuilder::new().project_root("/game"), origin)?;
        Ok(builder.build()?)
    }

    #[test]
    fn empty_manifest_keeps_builtin_layout() {
        let settings = build("").unwrap();
        assert_eq!(settings.product_name(), "gokoban");
        assert_eq!(settings.assets().len(), 5);
        assert_eq!(settings.build_command().program, "go");
    }

    #[test]
    fn sections_override_defaults() {
        let settings = build(
            r#"
            [package]
            name = "sokoban"
            include = ["COPYING"]

            [build]
            program = "make"
            args = ["release"]

            [filter]
            exclude_extensions = ["psd"]

            [[assets]]
            source = "art"
            dest = "data/art"
            filter = true

            [platforms.linux]
            dependencies = ["libfoo.so"]
            dependency_dir = "dist/linux"
            "#,
        )
        .unwrap();

        assert_eq!(settings.product_name(), "sokoban");
        assert_eq!(settings.include_files(), [PathBuf::from("COPYING")]);
        assert_eq!(settings.build_command().args, ["release"]);
        assert_eq!(settings.filter().extensions(), ["psd"]);
        assert_eq!(settings.assets()[0].dest, PathBuf::from("data/art"));
        assert_eq!(settings.assets()[0].filter, FilterPolicy::ExcludeDesignFiles);

        let linux = settings.profile(Platform::Linux);
        assert_eq!(linux.dependencies, ["libfoo.so"]);
        // untouched fields keep their defaults
        assert!(linux.build_flags.is_empty());
        assert_eq!(
            settings.profile(Platform::WindowsRelease).dependencies.len(),
            5
        );
    }

    #[test]
    fn unknown_platform_is_a_config_error() {
        let err = build("[platforms.macos]\ndependencies = []\n").unwrap_err();
        assert!(matches!(err, ReleaseError::Cli(CliError::InvalidConfig { .. })));
        assert!(err.to_string().contains("macos"));
    }

    #[test]
    fn rejected_values_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE_NAME),
            "[[assets]]\nsource = \"img\"\ndest = \"../outside\"\n",
        )
        .unwrap();

        let err = load_settings(dir.path(), None).unwrap_err();
        assert!(matches!(err, ReleaseError::Cli(CliError::InvalidConfig { .. })));
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(build("[package]\nversion = \"1.0\"\n").is_err());
    }
}
