use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Unix timestamp `lookback_days` before now. Commits older than this
/// fall outside the lookback window.
pub fn cutoff_timestamp(lookback_days: u32) -> i64 {
    cutoff_from(Utc::now(), lookback_days)
}

/// Same as [`cutoff_timestamp`] but relative to a fixed instant.
/// Saturates at `i64::MIN` when the window reaches past chrono's range.
pub fn cutoff_from(now: DateTime<Utc>, lookback_days: u32) -> i64 {
    now.checked_sub_signed(TimeDelta::days(i64::from(lookback_days)))
        .map(|t| t.timestamp())
        .unwrap_or(i64::MIN)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = dirs::home_dir()
        .ok_or_else(|| Error::InvalidPath("could not determine home directory".to_string()))?;
    Ok(home.join(rest))
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, so a failed write never leaves a truncated artifact behind.
/// Existing permissions on the target are kept.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    stage_write(path, contents)?.commit()
}

/// A fully written temporary file waiting to replace its target.
/// Dropping it without [`StagedFile::commit`] leaves the target untouched.
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the temporary file over the target.
    pub fn commit(self) -> Result<()> {
        self.tmp
            .persist(&self.target)
            .map_err(|e| Error::io("error creating", &self.target, e.error))?;
        Ok(())
    }
}

/// Write `contents` next to `path` without touching `path` itself.
pub fn stage_write(path: &Path, contents: &str) -> Result<StagedFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io("error creating temporary file in", dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| Error::io("error writing to", path, e))?;
    tmp.flush()
        .map_err(|e| Error::io("error writing to", path, e))?;

    let perms = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    };
    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms)
            .map_err(|e| Error::io("error setting permissions on", path, e))?;
    }

    Ok(StagedFile {
        tmp,
        target: path.to_path_buf(),
    })
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
#[path = "util_test.rs"]
mod tests;
