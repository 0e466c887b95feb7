//! Platform shared-library bundling.

use super::StagingRoot;
use crate::bundler::{
    error::Result,
    settings::{ReleaseTarget, Settings},
    utils::fs,
};
use std::path::PathBuf;

/// Copies the target platform's shared libraries next to the executable.
///
/// Libraries are copied in the configured order; the first missing or
/// unreadable file aborts with an error naming it. Platforms without
/// dependencies return an empty list without touching the disk.
///
/// Binary compatibility with the built executable is not checked.
pub async fn bundle_dependencies(
    settings: &Settings,
    target: &ReleaseTarget,
    staging: &StagingRoot,
) -> Result<Vec<PathBuf>> {
    let profile = settings.profile(target.platform());
    if profile.dependencies.is_empty() {
        log::info!("No shared libraries needed for {}", target.platform());
        return Ok(Vec::new());
    }

    let source_dir = settings.project_root().join(&profile.dependency_dir);
    let mut bundled = Vec::with_capacity(profile.dependencies.len());

    for name in &profile.dependencies {
        let from = source_dir.join(name);
        let to = staging.path().join(name);
        fs::copy_file(&from, &to).await?;
        log::info!("  bundled {}", name);
        bundled.push(to);
    }

    Ok(bundled)
}
