//! File system utilities for packaging.
//!
//! Provides file operations with path-aware error reporting. Directory walks
//! run on the blocking thread pool.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates a directory that must not exist yet.
///
/// Fails with [`Error::Conflict`] if anything already occupies `path`; the
/// existing entry is left untouched.
pub async fn create_new_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(Error::Conflict {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e).fs_context("creating directory", path),
    }
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::metadata(from).await.fs_context("reading", from)?;
    if !metadata.is_file() {
        return Err(Error::Fs {
            context: "copying".into(),
            path: from.to_path_buf(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying", from)?;
    Ok(())
}

/// Moves a file, falling back to copy and delete when a rename is not
/// possible (for example across filesystems).
///
/// On success `from` no longer exists.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    log::debug!(
        "rename {} -> {} failed, copying instead",
        from.display(),
        to.display()
    );
    copy_file(from, to).await?;
    fs::remove_file(from)
        .await
        .fs_context("removing moved file", from)?;
    Ok(())
}

/// Recursively copies a directory, skipping every entry `include` rejects.
///
/// `include` sees each entry below `from` (never `from` itself). Rejecting a
/// directory skips its whole subtree. Symlinks are followed so the copy holds
/// real files. File and directory permissions are carried over. Fails if
/// `from` is not a directory.
///
/// Returns the number of files copied.
pub async fn copy_dir_filtered<F>(from: &Path, to: &Path, include: F) -> Result<usize>
where
    F: Fn(&walkdir::DirEntry) -> bool + Send + 'static,
{
    let metadata = fs::metadata(from).await.fs_context("reading", from)?;
    if !metadata.is_dir() {
        return Err(Error::Fs {
            context: "copying".into(),
            path: from.to_path_buf(),
            error: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    // Clone paths for move into blocking closure
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || copy_tree(&from, &to, include))
        .await
        .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

fn copy_tree<F>(from: &Path, to: &Path, include: F) -> Result<usize>
where
    F: Fn(&walkdir::DirEntry) -> bool,
{
    std::fs::create_dir_all(to).fs_context("creating directory", to)?;

    let walker = walkdir::WalkDir::new(from)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || include(entry));

    let mut copied = 0;
    let mut dir_permissions = Vec::new();
    for entry in walker {
        let entry = entry?;
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::GenericError(format!("{e}")))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            dir_permissions.push((dest_path, entry.metadata()?.permissions()));
        } else {
            std::fs::copy(entry.path(), &dest_path).fs_context("copying", entry.path())?;
            log::debug!("copied {}", rel_path.display());
            copied += 1;
        }
    }

    // Deepest first, after every file is in place, so read-only directories
    // can still be filled.
    for (dir, permissions) in dir_permissions.into_iter().rev() {
        std::fs::set_permissions(&dir, permissions).fs_context("setting permissions", &dir)?;
    }

    Ok(copied)
}
