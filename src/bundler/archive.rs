//! Zip archive creation and staging cleanup.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    staging::StagingRoot,
    utils::fs,
};
use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Outcome of [`finalize`].
#[derive(Debug)]
pub struct FinalizedArchive {
    /// The finished archive.
    pub path: PathBuf,

    /// Staging directory that could not be removed, if any.
    ///
    /// The archive is valid either way; the directory has to be deleted by hand.
    pub leftover_staging: Option<PathBuf>,
}

/// Path of the archive for a staging name.
pub fn archive_path(project_root: &Path, staging_name: &str) -> PathBuf {
    project_root.join(format!("{staging_name}.zip"))
}

/// Compresses the staging tree into `<name>.zip` in `project_root`, then
/// removes the staging directory.
///
/// The archive is written to `<name>.zip.partial` and renamed into place only
/// when complete, so a `.zip` on disk is always a finished archive. If writing
/// fails the partial file is removed and the staging directory is kept. A
/// staging directory that cannot be removed after success is reported in
/// [`FinalizedArchive::leftover_staging`].
pub async fn finalize(staging: StagingRoot, project_root: &Path) -> Result<FinalizedArchive> {
    let archive = archive_path(project_root, staging.name());
    if tokio::fs::try_exists(&archive)
        .await
        .fs_context("checking archive path", &archive)?
    {
        return Err(Error::Conflict { path: archive });
    }

    let partial = project_root.join(format!("{}.zip.partial", staging.name()));
    log::info!("Archiving {} -> {}", staging.path().display(), archive.display());

    let written = {
        let source = staging.path().to_path_buf();
        let partial = partial.clone();
        tokio::task::spawn_blocking(move || write_zip(&source, &partial))
            .await
            .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
    };

    let entries = match written {
        Ok(entries) => entries,
        Err(e) => {
            match tokio::fs::remove_file(&partial).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
                Err(cleanup) => log::warn!(
                    "Failed to remove partial archive {}: {}",
                    partial.display(),
                    cleanup
                ),
            }
            log::error!(
                "Archiving failed; staging directory kept at {}",
                staging.path().display()
            );
            return Err(e);
        }
    };

    tokio::fs::rename(&partial, &archive)
        .await
        .fs_context("moving archive into place", &archive)?;
    log::info!("✓ Created {} ({} entries)", archive.display(), entries);

    Ok(FinalizedArchive {
        path: archive,
        leftover_staging: remove_staging(staging.path()).await,
    })
}

/// Removes the staging directory, returning its path if it is still there.
async fn remove_staging(path: &Path) -> Option<PathBuf> {
    match fs::remove_dir_all(path).await {
        Ok(()) => {
            log::debug!("Removed staging directory {}", path.display());
            None
        }
        Err(e) => {
            log::warn!("Failed to clean up staging directory: {}", e);
            Some(path.to_path_buf())
        }
    }
}

/// Writes every entry below `source` into a new zip at `dest`.
///
/// Entry names are relative to `source` with `/` separators, so extracting
/// reproduces the tree directly. Returns the number of entries written.
fn write_zip(source: &Path, dest: &Path) -> Result<usize> {
    let zip_err = |error: zip::result::ZipError| Error::Archive {
        path: dest.to_path_buf(),
        error,
    };

    let file = File::create(dest).fs_context("creating archive", dest)?;
    let mut zip = ZipWriter::new(file);
    let base_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0;
    for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::GenericError(format!("{e}")))?;
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if name.is_empty() {
            continue;
        }

        let options = base_options.unix_permissions(permissions(&entry)?);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options).map_err(zip_err)?;
        } else {
            zip.start_file(name, options).map_err(zip_err)?;
            let mut reader = File::open(entry.path()).fs_context("reading", entry.path())?;
            io::copy(&mut reader, &mut zip).fs_context("compressing", entry.path())?;
        }
        entries += 1;
    }

    let mut file = zip.finish().map_err(zip_err)?;
    file.flush().fs_context("flushing archive", dest)?;
    file.sync_all().fs_context("syncing archive", dest)?;

    Ok(entries)
}

#[cfg(unix)]
fn permissions(entry: &walkdir::DirEntry) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = entry.metadata()?;
    Ok(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permissions(entry: &walkdir::DirEntry) -> Result<u32> {
    Ok(if entry.file_type().is_dir() { 0o755 } else { 0o644 })
}
