//! Main release orchestration.
//!
//! This module provides the [`Bundler`] that drives one release through the
//! pipeline states:
//!
//! ```text
//! Idle -> Building -> Staging -> Bundling -> Archiving -> Done
//!   \________\___________\__________\__________\-> Failed(stage)
//! ```

use super::{checksum::calculate_sha256, toolchain};
use crate::bundler::{
    BundledArtifact, PipelineError, Result, Settings,
    archive::{self, archive_path},
    error::{Error, ErrorExt},
    settings::ReleaseTarget,
    staging::{self, staging_path},
};
use std::fmt;

/// A non-terminal pipeline state, used to attribute failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Preflight checks before anything is built
    Idle,
    /// Running the build toolchain
    Building,
    /// Assembling the staging tree
    Staging,
    /// Copying platform shared libraries
    Bundling,
    /// Writing the archive and cleaning up
    Archiving,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Idle => "preflight",
            Stage::Building => "build",
            Stage::Staging => "staging",
            Stage::Bundling => "dependency bundling",
            Stage::Archiving => "archiving",
        })
    }
}

/// Where the pipeline is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started
    Idle,
    /// Running the build toolchain
    Building,
    /// Assembling the staging tree
    Staging,
    /// Copying platform shared libraries
    Bundling,
    /// Writing the archive
    Archiving,
    /// Archive created
    Done,
    /// Stopped by a failure in the given stage
    Failed(Stage),
}

impl PipelineState {
    fn stage(self) -> Option<Stage> {
        match self {
            PipelineState::Idle => Some(Stage::Idle),
            PipelineState::Building => Some(Stage::Building),
            PipelineState::Staging => Some(Stage::Staging),
            PipelineState::Bundling => Some(Stage::Bundling),
            PipelineState::Archiving => Some(Stage::Archiving),
            PipelineState::Done | PipelineState::Failed(_) => None,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(stage) => write!(f, "failed during {stage}"),
            other => match other.stage() {
                Some(stage) => write!(f, "{stage}"),
                None => Ok(()),
            },
        }
    }
}

/// Release orchestrator.
///
/// Single-shot: [`Bundler::bundle`] runs the pipeline once; later calls fail
/// without touching the disk.
///
/// # Examples
///
/// ```no_run
/// use gokoban_release::bundler::{Bundler, Platform, ReleaseTarget, SettingsBuilder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = SettingsBuilder::new().project_root(".").build()?;
/// let target = ReleaseTarget::new(Platform::Linux, "1.0.0")?;
///
/// let mut bundler = Bundler::new(settings, target);
/// let artifact = bundler.bundle().await?;
/// println!("{} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    target: ReleaseTarget,
    state: PipelineState,
}

impl Bundler {
    /// Creates a pipeline for one release.
    pub fn new(settings: Settings, target: ReleaseTarget) -> Self {
        Self {
            settings,
            target,
            state: PipelineState::Idle,
        }
    }

    /// Returns the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the release target.
    pub fn target(&self) -> &ReleaseTarget {
        &self.target
    }

    /// Current pipeline state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs build, staging, bundling and archiving in sequence.
    ///
    /// Stops at the first failure and moves to [`PipelineState::Failed`].
    /// Nothing is cleaned up after a failure: a partial staging directory is
    /// left for inspection and must be removed before retrying the same
    /// version.
    pub async fn bundle(&mut self) -> std::result::Result<BundledArtifact, PipelineError> {
        if self.state != PipelineState::Idle {
            return Err(PipelineError {
                stage: Stage::Idle,
                cause: Error::AlreadyRan(self.state.to_string()),
            });
        }

        match self.run().await {
            Ok(artifact) => {
                self.state = PipelineState::Done;
                Ok(artifact)
            }
            Err(cause) => {
                let stage = self.state.stage().unwrap_or(Stage::Idle);
                self.state = PipelineState::Failed(stage);
                log::error!("{} failed: {}", stage, cause);
                Err(PipelineError { stage, cause })
            }
        }
    }

    async fn run(&mut self) -> Result<BundledArtifact> {
        let platform = self.target.platform();
        log::info!(
            "Packaging {} {} for {}",
            self.settings.product_name(),
            self.target.version(),
            platform
        );

        self.preflight().await?;

        self.advance(PipelineState::Building);
        let executable = toolchain::invoke(&self.settings, platform).await?;

        self.advance(PipelineState::Staging);
        let staging = staging::assemble(&self.settings, &self.target, executable).await?;

        self.advance(PipelineState::Bundling);
        let dependencies =
            staging::bundle_dependencies(&self.settings, &self.target, &staging).await?;

        self.advance(PipelineState::Archiving);
        let finalized = archive::finalize(staging, self.settings.project_root()).await?;

        let size = tokio::fs::metadata(&finalized.path)
            .await
            .fs_context("reading archive metadata", &finalized.path)?
            .len();
        let checksum = calculate_sha256(&finalized.path).await?;

        Ok(BundledArtifact {
            platform,
            path: finalized.path,
            size,
            checksum,
            dependencies: dependencies
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
            leftover_staging: finalized.leftover_staging,
        })
    }

    /// Refuses to start when an earlier run's outputs are still on disk.
    async fn preflight(&self) -> Result<()> {
        let staging = staging_path(&self.settings, &self.target);
        let archive = archive_path(
            self.settings.project_root(),
            &self.target.staging_name(self.settings.product_name()),
        );

        for path in [staging, archive] {
            if tokio::fs::try_exists(&path)
                .await
                .fs_context("checking output path", &path)?
            {
                return Err(Error::Conflict { path });
            }
        }
        Ok(())
    }

    fn advance(&mut self, next: PipelineState) {
        log::debug!("pipeline: {} -> {}", self.state, next);
        self.state = next;
    }
}
