//! Staging tree assembly.

use super::filter::entry_filter;
use crate::bundler::{
    builder::BuiltExecutable,
    error::Result,
    settings::{ReleaseTarget, Settings},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// The directory that becomes the archive's contents.
///
/// Not `Clone`: the archiver takes it by value and removes it once the
/// archive is written.
#[derive(Debug)]
pub struct StagingRoot {
    name: String,
    path: PathBuf,
}

impl StagingRoot {
    /// Staging name, also the archive's base name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Where the staging directory for `target` lives.
pub fn staging_path(settings: &Settings, target: &ReleaseTarget) -> PathBuf {
    settings
        .project_root()
        .join(target.staging_name(settings.product_name()))
}

/// Builds the staging tree for `target`.
///
/// # Process
///
/// 1. Creates `<product>-<platform>-<version>` in the project root, failing
///    with a conflict if it already exists
/// 2. Copies every asset source, one after another, filtering where configured
/// 3. Copies the always-included files
/// 4. Moves the built executable into the staging root
///
/// A failure part way through leaves the partial directory on disk for
/// inspection.
pub async fn assemble(
    settings: &Settings,
    target: &ReleaseTarget,
    executable: BuiltExecutable,
) -> Result<StagingRoot> {
    let name = target.staging_name(settings.product_name());
    let path = staging_path(settings, target);

    fs::create_new_dir(&path).await?;
    log::info!("Staging into {}", path.display());

    for asset in settings.assets() {
        let from = settings.project_root().join(&asset.source);
        let to = path.join(&asset.dest);
        let include = entry_filter(settings.filter(), asset.filter);

        let copied = fs::copy_dir_filtered(&from, &to, include).await?;
        log::info!(
            "  {} -> {} ({} files, {:?})",
            asset.source.display(),
            asset.dest.display(),
            copied,
            asset.filter
        );
    }

    for file in settings.include_files() {
        let from = settings.project_root().join(file);
        let file_name = from.file_name().unwrap_or(file.as_os_str()).to_owned();
        fs::copy_file(&from, &path.join(file_name)).await?;
        log::debug!("  included {}", file.display());
    }

    let executable = executable.move_into(&path).await?;
    log::info!("  executable {}", executable.display());

    Ok(StagingRoot { name, path })
}
