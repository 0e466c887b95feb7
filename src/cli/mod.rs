//! Command line interface for the release packager.
//!
//! Parses the two required inputs, loads settings, runs the pipeline and
//! reports the result.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Bundler, ReleaseTarget};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs a release for already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    let config = RuntimeConfig::try_from(args)?;
    let target = ReleaseTarget::new(args.os, args.version.clone())
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let settings = crate::metadata::load_settings(config.project_root(), config.config())?;

    config.section(&format!(
        "Packaging {} {} for {}",
        settings.product_name(),
        target.version(),
        target.platform()
    ))?;
    config.progress(&format!(
        "Project root: {}",
        settings.project_root().display()
    ))?;
    config.verbose_println(&format!(
        "Build command: {} {}",
        settings.build_command().program,
        settings.build_command().args.join(" ")
    ))?;

    let mut bundler = Bundler::new(settings, target);
    let artifact = bundler.bundle().await?;

    config.success(&format!("Created {}", artifact.path.display()))?;
    config.indent(&format!("Size:   {} bytes", artifact.size))?;
    config.indent(&format!("SHA256: {}", artifact.checksum))?;
    if !artifact.dependencies.is_empty() {
        config.indent(&format!("Bundled: {}", artifact.dependencies.join(", ")))?;
    }
    if let Some(leftover) = &artifact.leftover_staging {
        config.warn(&format!(
            "staging directory {} could not be removed; delete it by hand",
            leftover.display()
        ))?;
    }

    Ok(0)
}
