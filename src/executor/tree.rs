//! Recursive directory copy

use super::copy::copy_file_atomic;
use super::PairOutcome;
use crate::types::CopyError;
use std::fs;
use std::io;
use std::path::Path;

/// Copy the directory `src` and everything below it to `dest`
///
/// `dest` and its missing ancestors are created. Existing directories are
/// merged into and existing files overwritten. Relative paths below `src`
/// are preserved. Nested symlinks are recreated as links; sockets, FIFOs and
/// devices are skipped.
///
/// Nothing is filtered: hidden files and `.gitignore`d entries are copied
/// like any other.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<PairOutcome, CopyError> {
    let mut outcome = PairOutcome::default();

    let walker = ignore::WalkBuilder::new(src)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for result in walker {
        let entry = result.map_err(walk_error)?;

        if entry.depth() == 0 {
            fs::create_dir_all(dest).map_err(CopyError::Io)?;
            outcome.dirs_copied += 1;
            continue;
        }

        let relative = entry.path().strip_prefix(src).map_err(|_| {
            CopyError::Io(io::Error::other(format!(
                "{} is not below {}",
                entry.path().display(),
                src.display()
            )))
        })?;
        let target = dest.join(relative);

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(CopyError::Io)?;
            outcome.dirs_copied += 1;
        } else if file_type.is_symlink() {
            relink(&entry, &target)?;
            outcome.symlinks_copied += 1;
        } else if file_type.is_file() {
            let bytes = copy_file_atomic(entry.path(), &target)?;
            tracing::trace!(path = %relative.display(), bytes, "copied file");
            outcome.files_copied += 1;
            outcome.bytes_copied += bytes;
        } else {
            tracing::warn!(path = %entry.path().display(), "skipping special file");
        }
    }

    Ok(outcome)
}

/// Point a fresh link at `target` to wherever the walked link points
///
/// Whatever already sits at `target` is cleared first; the link's own
/// target is copied as-is and never resolved.
fn relink(entry: &ignore::DirEntry, target: &Path) -> Result<(), CopyError> {
    let points_to = fs::read_link(entry.path()).map_err(CopyError::Io)?;

    match fs::symlink_metadata(target) {
        Ok(existing) if existing.is_dir() => fs::remove_dir_all(target).map_err(CopyError::Io)?,
        Ok(_) => fs::remove_file(target).map_err(CopyError::Io)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(CopyError::Io(e)),
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(&points_to, target).map_err(CopyError::Io)?;

    #[cfg(windows)]
    {
        // Windows needs the link kind up front; dangling links become file links.
        if entry.path().is_dir() {
            std::os::windows::fs::symlink_dir(&points_to, target).map_err(CopyError::Io)?;
        } else {
            std::os::windows::fs::symlink_file(&points_to, target).map_err(CopyError::Io)?;
        }
    }

    tracing::trace!(
        link = %target.display(),
        points_to = %points_to.display(),
        "recreated symlink"
    );
    Ok(())
}

fn walk_error(err: ignore::Error) -> CopyError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io_err) => CopyError::Io(io_err),
        None => CopyError::Io(io::Error::other(message)),
    }
}
