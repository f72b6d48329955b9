//! Modification-time primitives
//!
//! These helpers only ever touch file metadata. Contents are never read or
//! written and missing files are never created.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::error::ReloadError;

/// Read the modification time of `path`
pub fn modified(path: &Path) -> Result<SystemTime, ReloadError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| ReloadError::Timestamp {
            path: path.to_path_buf(),
            source,
        })
}

/// Set the modification time of `path` to `time`
pub fn stamp(path: &Path, time: SystemTime) -> Result<(), ReloadError> {
    open_for_times(path)
        .and_then(|file| file.set_modified(time))
        .map_err(|source| ReloadError::Timestamp {
            path: path.to_path_buf(),
            source,
        })
}

// futimens only needs ownership, so a read-only handle is enough on unix
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::options().write(true).open(path)
}

/// Largest push past the floor before giving up on a filesystem
const MAX_BUMP: Duration = Duration::from_secs(8);

/// Bump `path` to the current time and return the mtime the filesystem
/// actually recorded.
///
/// The result is strictly newer than both the file's previous mtime and
/// `floor`. When the clock or the filesystem's timestamp granularity would
/// not produce such a value, the file is pushed past the floor in growing
/// steps (1s, 2s, 4s, 8s). A filesystem that still records nothing newer
/// yields `ReloadError::Timestamp`.
pub fn touch_now(path: &Path, floor: SystemTime) -> Result<SystemTime, ReloadError> {
    let floor = modified(path)?.max(floor);

    stamp(path, SystemTime::now())?;
    let mut after = modified(path)?;

    let mut step = Duration::from_secs(1);
    while after <= floor {
        if step > MAX_BUMP {
            return Err(ReloadError::Timestamp {
                path: path.to_path_buf(),
                source: io::Error::other("filesystem did not record a newer modification time"),
            });
        }
        stamp(path, floor + step)?;
        after = modified(path)?;
        step *= 2;
    }

    Ok(after)
}
