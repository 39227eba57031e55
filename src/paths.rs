//! Per-user state paths and privilege helpers.
//!
//! Everything the tool persists outside the hosts file lives under
//! `~/.dblock`: the configuration document, the pre-write backup snapshot,
//! and the diagnostic log. When the tool runs under `sudo`, files created
//! here are handed back to the invoking user so they stay editable without
//! elevation.

use crate::error::{DblockError, Result};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Directory name under the user's home.
const STATE_DIR_NAME: &str = ".dblock";

/// Returns the per-user state directory (`~/.dblock`).
///
/// # Errors
///
/// Returns [`DblockError::NoHomeDir`] if the home directory cannot be
/// resolved.
pub fn state_dir() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().ok_or(DblockError::NoHomeDir)?;
    Ok(base.home_dir().join(STATE_DIR_NAME))
}

/// Default configuration file location.
///
/// # Errors
///
/// Returns [`DblockError::NoHomeDir`] if the home directory cannot be
/// resolved.
pub fn config_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("default.yaml"))
}

/// Location of the single pre-write backup snapshot.
///
/// # Errors
///
/// Returns [`DblockError::NoHomeDir`] if the home directory cannot be
/// resolved.
pub fn backup_file() -> Result<PathBuf> {
    Ok(state_dir()?.join("backups").join("hosts.bak"))
}

/// Directory holding the rotating diagnostic log.
///
/// # Errors
///
/// Returns [`DblockError::NoHomeDir`] if the home directory cannot be
/// resolved.
pub fn log_dir() -> Result<PathBuf> {
    Ok(state_dir()?.join("logs"))
}

/// Creates `dir` and any missing parents, then fixes its ownership.
///
/// # Errors
///
/// Returns [`DblockError::Io`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    fix_ownership(dir);
    Ok(())
}

/// Hands a path created while running under `sudo` back to the invoking
/// user. A no-op outside `sudo`; failures are ignored — ownership is a
/// convenience, not a correctness requirement.
pub fn fix_ownership(path: &Path) {
    let Some((uid, gid)) = sudo_user_ids() else {
        return;
    };
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return;
    };
    // SAFETY: chown(2) only reads the path string.
    unsafe {
        libc::chown(cpath.as_ptr(), uid, gid);
    }
}

/// The invoking user's uid/gid when running under `sudo`.
fn sudo_user_ids() -> Option<(libc::uid_t, libc::gid_t)> {
    let uid = std::env::var("SUDO_UID").ok()?.parse().ok()?;
    let gid = std::env::var("SUDO_GID").ok()?.parse().ok()?;
    Some((uid, gid))
}

/// Returns `true` if the process runs with an effective uid of 0.
#[must_use]
pub fn is_root() -> bool {
    // SAFETY: geteuid(2) takes no arguments and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Checks write access to `path` via the OS access-control facility.
///
/// Uses `access(2)` with `W_OK`, so a caller lacking privilege gets a clear
/// answer before any read is attempted. Returns `false` for paths that do
/// not exist.
#[must_use]
pub fn has_write_access(path: &Path) -> bool {
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: access(2) only reads the path string.
    unsafe { libc::access(cpath.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_access_on_own_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "x").unwrap();
        assert!(has_write_access(&path));
    }

    #[test]
    fn no_write_access_on_missing_path() {
        assert!(!has_write_access(Path::new("/nonexistent/hosts")));
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn state_paths_share_the_state_dir() {
        let state = state_dir().unwrap();
        assert!(config_file().unwrap().starts_with(&state));
        assert!(backup_file().unwrap().starts_with(&state));
        assert!(log_dir().unwrap().starts_with(&state));
    }
}
