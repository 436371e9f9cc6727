//! Directory housekeeping for the output and staging trees.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GenerateError, Result};

/// Remove `path` and everything under it. A missing path is not an error.
pub fn remove_dir_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed directory tree.");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(GenerateError::fs("remove directory", path, err)),
    }
}

/// Create `path` and any missing parents (0755 on Unix).
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(path)
        .map_err(|err| GenerateError::fs("create directory", path, err))
}

/// Wipe `path` and leave an empty directory in its place.
pub fn recreate_dir(path: &Path) -> Result<()> {
    remove_dir_tree(path)?;
    ensure_dir(path)
}

/// Copy every file under `source` to the same relative path under
/// `destination`, returning the number of files copied.
///
/// The source tree is left untouched. A missing source copies nothing.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize> {
    if !source.is_dir() {
        debug!(source = %source.display(), "Nothing to copy, source directory is missing.");
        return Ok(0);
    }

    ensure_dir(destination)?;

    let mut copied = 0;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(source).to_path_buf();
            GenerateError::fs("walk", path, io::Error::other(err))
        })?;
        let rel_path = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| GenerateError::fs("relativize", entry.path(), io::Error::other(err)))?;
        let target = destination.join(rel_path);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|err| GenerateError::fs("copy file to", &target, err))?;
            copied += 1;
        }
    }

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        copied,
        "Copied directory tree."
    );
    Ok(copied)
}
