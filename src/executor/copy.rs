//! Atomic file copy implementation

use crate::types::CopyError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Create parent directories of `dest`
/// 2. Stream `src` into a uniquely named hidden `.part` file next to `dest`
///    and sync it
/// 3. Carry over permissions and mtime
/// 4. Persist the temp file over `dest`, replacing any existing file
///
/// The temp file name never collides with an existing entry, so neither the
/// source nor unrelated files in the destination directory are touched. It is
/// deleted if any step before the final rename fails.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(CopyError)` - IO error from any step
///
/// # Example
/// ```no_run
/// use bundle_copy::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("src/logo.svg"), Path::new("dist/logo.svg"))?;
/// # Ok::<(), bundle_copy::CopyError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, CopyError> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(CopyError::Io)?;

    let mut src_file = File::open(src).map_err(CopyError::Io)?;
    let mut staged = tempfile::Builder::new()
        .prefix(".")
        .suffix(".part")
        .tempfile_in(parent)
        .map_err(CopyError::Io)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(CopyError::Io)?;
        if bytes_read == 0 {
            break;
        }

        staged
            .as_file_mut()
            .write_all(&buffer[0..bytes_read])
            .map_err(CopyError::Io)?;
        total_bytes += bytes_read as u64;
    }

    staged.as_file().sync_all().map_err(CopyError::Io)?;

    let src_metadata = src_file.metadata().map_err(CopyError::Io)?;
    fs::set_permissions(staged.path(), src_metadata.permissions()).map_err(CopyError::Io)?;

    let mtime = src_metadata.modified().map_err(CopyError::Io)?;
    filetime::set_file_mtime(staged.path(), filetime::FileTime::from_system_time(mtime))
        .map_err(CopyError::Io)?;

    staged.persist(dest).map_err(|e| CopyError::Io(e.error))?;

    Ok(total_bytes)
}
