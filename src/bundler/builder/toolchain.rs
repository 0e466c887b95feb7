//! Build toolchain invocation.
//!
//! Runs the game's build command with the flags of the target platform and
//! hands the resulting executable over as a [`BuiltExecutable`].

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{Platform, Settings},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// The executable produced by a successful build.
///
/// There is exactly one owner of the built file. Moving it into the staging
/// tree consumes this handle, so the pre-move location cannot be used again.
#[derive(Debug)]
pub struct BuiltExecutable {
    path: PathBuf,
}

impl BuiltExecutable {
    /// Takes ownership of an already built executable.
    ///
    /// Fails with [`Error::MissingExecutable`] if `path` is not a regular file.
    pub async fn adopt(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Ok(Self { path }),
            _ => Err(Error::MissingExecutable { path }),
        }
    }

    /// Current location of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name of the executable.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Moves the executable into `dir` and returns its new path.
    pub async fn move_into(self, dir: &Path) -> Result<PathBuf> {
        let dest = dir.join(self.file_name());
        fs::move_file(&self.path, &dest).await?;
        log::debug!("moved {} -> {}", self.path.display(), dest.display());
        Ok(dest)
    }
}

/// Command line the toolchain runs for `platform`.
pub fn build_command_line(settings: &Settings, platform: Platform) -> (String, Vec<String>) {
    let command = settings.build_command();
    let args = command
        .args
        .iter()
        .chain(settings.profile(platform).build_flags.iter())
        .cloned()
        .collect();
    (command.program.clone(), args)
}

/// Locates the build program in `PATH`.
///
/// Relative paths such as `./build.sh` resolve against `project_root`, where
/// the build runs.
fn find_toolchain(program: &str, project_root: &Path) -> Result<PathBuf> {
    match which::which_in(program, std::env::var_os("PATH"), project_root) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", program, e);
            Err(Error::ToolchainNotFound {
                program: program.to_string(),
            })
        }
    }
}

/// Builds the game for `platform` in the project root.
///
/// Blocks until the toolchain exits; no timeout is applied, so a hung
/// toolchain hangs the release. Toolchain output goes straight to the
/// terminal.
///
/// # Errors
///
/// - [`Error::ToolchainNotFound`] if the program is not installed
/// - [`Error::CommandFailed`] if it cannot be started
/// - [`Error::BuildFailed`] on a nonzero exit
/// - [`Error::MissingExecutable`] if it exits cleanly without producing the executable
pub async fn invoke(settings: &Settings, platform: Platform) -> Result<BuiltExecutable> {
    let (program, args) = build_command_line(settings, platform);
    let command_line = std::iter::once(program.as_str())
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    let program_path = find_toolchain(&program, settings.project_root())?;

    log::info!("Building {} for {}: {}", settings.product_name(), platform, command_line);

    let status = tokio::process::Command::new(&program_path)
        .args(&args)
        .current_dir(settings.project_root())
        .status()
        .await
        .map_err(|error| Error::CommandFailed {
            command: command_line.clone(),
            error,
        })?;

    if !status.success() {
        return Err(Error::BuildFailed {
            command: command_line,
            platform,
            code: status.code(),
        });
    }

    let executable = settings.executable_path(platform);
    let built = BuiltExecutable::adopt(&executable).await?;

    let size = tokio::fs::metadata(built.path())
        .await
        .fs_context("reading executable metadata", built.path())?
        .len();
    log::info!("✓ Built {} ({} bytes)", executable.display(), size);

    Ok(built)
}
