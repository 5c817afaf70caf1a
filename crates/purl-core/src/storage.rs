//! Disk writes with all-or-nothing visibility.
//!
//! Content is written to a temp file in the destination directory, synced,
//! and renamed over the final name. The temp file is removed on drop if the
//! rename never happens, so readers only ever see the old or the new bytes.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Mode applied to newly created files (existing files keep theirs).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// What `write_if_changed` did to the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

impl WriteOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Updated => "updated",
            WriteOutcome::Unchanged => "unchanged",
        }
    }
}

/// Atomically write `content` to `path` unless the file already holds exactly these bytes.
pub fn write_if_changed(path: &Path, content: &[u8]) -> Result<WriteOutcome> {
    let existed = path.exists();
    if existed {
        // An unreadable file is treated as different and replaced.
        if let Ok(old) = fs::read(path) {
            if old == content {
                return Ok(WriteOutcome::Unchanged);
            }
        }
    }

    replace_atomically(path, content)?;
    Ok(if existed {
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    })
}

/// Replace `path` with `content` via temp file + rename in the same directory.
/// Creates the parent directory if needed and preserves an existing file's permissions.
pub fn replace_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;

    let existing_mode = existing_mode(path);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    tmp.write_all(content)
        .with_context(|| format!("write temp file for {}", path.display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp file for {}", path.display()))?;
    set_mode(tmp.path(), existing_mode.unwrap_or(DEFAULT_FILE_MODE))?;

    tmp.persist(path)
        .with_context(|| format!("rename temp file to {}", path.display()))?;
    Ok(())
}

/// Directory a sibling temp file should live in. `Path::parent` yields `""` for bare names.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn existing_mode(path: &Path) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).ok().map(|m| m.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn existing_mode(_path: &Path) -> Option<u32> {
    None
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
