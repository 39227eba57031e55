//! Hosts-file blocking controller.
//!
//! Orchestrates one enable/disable cycle: permission precheck, read,
//! backup snapshot, section edit, write-back. The write-back goes through a
//! temp file renamed into place so an interrupted run never leaves the
//! hosts file half-written.

use crate::config::Config;
use crate::editor;
use crate::entries;
use crate::error::{DblockError, Result};
use crate::paths;
use std::fmt;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Current blocking state as reported by [`HostsBlocker::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingStatus {
    /// The start marker is present in the target file.
    Enabled,
    /// No managed section found.
    Disabled,
}

impl fmt::Display for BlockingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("Enabled"),
            Self::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Manages the `dblock` section of a hosts file.
///
/// # Lifecycle
///
/// 1. [`enable`](Self::enable) replaces any existing managed section with a
///    fresh one generated from the configuration.
/// 2. [`disable`](Self::disable) removes the managed section.
/// 3. [`status`](Self::status) reports whether a section is present.
///
/// Every mutating call snapshots the unmodified file to the backup path
/// first. The snapshot is overwritten each time and is never consulted
/// automatically — it exists for manual recovery.
///
/// # Permissions
///
/// The default target is `/etc/hosts`, so [`enable`](Self::enable) and
/// [`disable`](Self::disable) normally require root. Write access is
/// checked up front and reported as a permission error rather than a
/// downstream I/O failure.
pub struct HostsBlocker {
    hosts_path: PathBuf,
    backup_path: PathBuf,
}

impl HostsBlocker {
    /// Creates a blocker targeting the configured hosts file, with the
    /// backup snapshot at its per-user default location.
    ///
    /// # Errors
    ///
    /// Returns [`DblockError::NoHomeDir`] if the per-user state directory
    /// cannot be resolved.
    pub fn for_config(config: &Config) -> Result<Self> {
        Ok(Self {
            hosts_path: config.hosts_file.clone(),
            backup_path: paths::backup_file()?,
        })
    }

    /// Creates a blocker with explicit target and backup paths (useful for
    /// testing).
    #[must_use]
    pub fn with_paths(hosts_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            hosts_path: hosts_path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// Returns the target hosts file path.
    #[must_use]
    pub fn hosts_path(&self) -> &Path {
        &self.hosts_path
    }

    /// Inserts a fresh managed section generated from `config`.
    ///
    /// Any pre-existing managed section is removed first, so repeated calls
    /// leave exactly one section in the file. Content outside the section
    /// is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DblockError::Permission`] if the target is not writable,
    /// or [`DblockError::Io`] if the file, the backup, or the backup
    /// directory cannot be read or written. A backup failure aborts the
    /// operation before the target is touched.
    pub fn enable(&self, config: &Config) -> Result<()> {
        self.check_writable()?;
        let content = std::fs::read_to_string(&self.hosts_path)?;
        self.write_backup(&content)?;

        let body = entries::generate(config);
        let updated = editor::insert(&editor::strip(&content), &body);
        self.write_hosts(&updated)?;

        tracing::info!(
            path = %self.hosts_path.display(),
            domains = config.domains.len(),
            subdomains = config.subdomains.len(),
            "Enabled domain blocking"
        );
        Ok(())
    }

    /// Removes the managed section, restoring unmanaged content only.
    ///
    /// A file without a managed section is rewritten unchanged apart from
    /// trailing-whitespace normalization.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`enable`](Self::enable).
    pub fn disable(&self) -> Result<()> {
        self.check_writable()?;
        let content = std::fs::read_to_string(&self.hosts_path)?;
        self.write_backup(&content)?;

        let stripped = editor::strip(&content);
        let trimmed = stripped.trim_end_matches([' ', '\n']);
        let updated = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}\n")
        };
        self.write_hosts(&updated)?;

        tracing::info!(path = %self.hosts_path.display(), "Disabled domain blocking");
        Ok(())
    }

    /// Reports whether a managed section is present.
    ///
    /// Presence of the literal start marker anywhere in the raw content is
    /// sufficient; section integrity is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`DblockError::Io`] if the target cannot be read.
    pub fn status(&self) -> Result<BlockingStatus> {
        let content = std::fs::read_to_string(&self.hosts_path)?;
        if content.contains(editor::MARKER_START) {
            Ok(BlockingStatus::Enabled)
        } else {
            Ok(BlockingStatus::Disabled)
        }
    }

    fn check_writable(&self) -> Result<()> {
        if paths::has_write_access(&self.hosts_path) {
            Ok(())
        } else {
            Err(DblockError::Permission {
                path: self.hosts_path.clone(),
            })
        }
    }

    /// Snapshots the unmodified content to the backup path, overwriting any
    /// previous snapshot.
    fn write_backup(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.backup_path.parent() {
            paths::ensure_dir(parent)?;
        }
        std::fs::write(&self.backup_path, content)?;
        paths::fix_ownership(&self.backup_path);

        tracing::debug!(path = %self.backup_path.display(), "Wrote hosts snapshot");
        Ok(())
    }

    /// Writes the new content through a temp file renamed into place.
    fn write_hosts(&self, content: &str) -> Result<()> {
        let dir = self.hosts_path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.hosts_path).map_err(|e| e.error)?;
        // The temp file is created 0600; the hosts file must stay
        // world-readable.
        std::fs::set_permissions(&self.hosts_path, std::fs::Permissions::from_mode(0o644))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocker_in(dir: &Path) -> HostsBlocker {
        HostsBlocker::with_paths(dir.join("hosts"), dir.join("backups").join("hosts.bak"))
    }

    fn config(domains: &[&str]) -> Config {
        Config {
            hosts_file: PathBuf::new(),
            domains: domains.iter().map(ToString::to_string).collect(),
            subdomains: Vec::new(),
        }
    }

    #[test]
    fn enable_on_empty_file_writes_only_the_section() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = blocker_in(dir.path());
        std::fs::write(blocker.hosts_path(), "").unwrap();

        blocker.enable(&config(&["a.com"])).unwrap();

        let written = std::fs::read_to_string(blocker.hosts_path()).unwrap();
        assert_eq!(
            written,
            "# BEGIN dblock\n\
             127.0.0.1\ta.com\n::1\ta.com\n127.0.0.1\twww.a.com\n::1\twww.a.com\n\
             # END dblock\n"
        );
    }

    #[test]
    fn backup_holds_the_pre_write_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = blocker_in(dir.path());
        std::fs::write(blocker.hosts_path(), "127.0.0.1 localhost\n").unwrap();

        blocker.enable(&config(&["a.com"])).unwrap();

        let backup = std::fs::read_to_string(dir.path().join("backups").join("hosts.bak")).unwrap();
        assert_eq!(backup, "127.0.0.1 localhost\n");
    }

    #[test]
    fn backup_failure_aborts_before_the_target_is_touched() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the backup directory should go.
        std::fs::write(dir.path().join("backups"), "in the way").unwrap();

        let blocker = blocker_in(dir.path());
        std::fs::write(blocker.hosts_path(), "127.0.0.1 localhost\n").unwrap();

        assert!(blocker.enable(&config(&["a.com"])).is_err());
        let untouched = std::fs::read_to_string(blocker.hosts_path()).unwrap();
        assert_eq!(untouched, "127.0.0.1 localhost\n");
    }

    #[test]
    fn missing_target_is_a_permission_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = blocker_in(dir.path());

        let err = blocker.enable(&config(&["a.com"])).unwrap_err();
        assert!(err.is_permission_denied());
    }

    #[test]
    fn status_does_not_require_write_access() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = blocker_in(dir.path());
        std::fs::write(blocker.hosts_path(), "# BEGIN dblock\n# END dblock\n").unwrap();

        assert_eq!(blocker.status().unwrap(), BlockingStatus::Enabled);
    }

    #[test]
    fn disable_normalizes_trailing_whitespace_only() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = blocker_in(dir.path());
        std::fs::write(blocker.hosts_path(), "127.0.0.1 localhost  \n\n").unwrap();

        blocker.disable().unwrap();

        let written = std::fs::read_to_string(blocker.hosts_path()).unwrap();
        assert_eq!(written, "127.0.0.1 localhost\n");
    }
}
