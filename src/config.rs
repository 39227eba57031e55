//! Configuration document.
//!
//! A small YAML file selects the target hosts file and the domain lists.
//! Missing fields fall back to sensible defaults, and a missing file is
//! replaced by a starter document on first run.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default target file on Unix systems.
const DEFAULT_HOSTS_FILE: &str = "/etc/hosts";

/// Blocking configuration, immutable for the duration of one invocation.
///
/// # Example
///
/// ```
/// let config: dblock::Config = serde_yaml::from_str(
///     "domains:\n  - x.com\nsubdomains:\n  - mail.example.org\n",
/// ).unwrap();
///
/// assert_eq!(config.hosts_file, std::path::PathBuf::from("/etc/hosts"));
/// assert_eq!(config.domains, vec!["x.com"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target hosts file.
    #[serde(default = "default_hosts_file")]
    pub hosts_file: PathBuf,

    /// Domains blocked as both the apex and its `www.` variant.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Hosts blocked verbatim, with no `www.` expansion.
    #[serde(default)]
    pub subdomains: Vec<String>,
}

fn default_hosts_file() -> PathBuf {
    PathBuf::from(DEFAULT_HOSTS_FILE)
}

impl Config {
    /// Loads the configuration from `path`, creating a default document
    /// first if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DblockError::Io`] if the file (or its parent
    /// directory, on first run) cannot be read or written, and
    /// [`crate::DblockError::Config`] if the document does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::write_default(path)?;
                std::fs::read_to_string(path)?
            }
            Err(e) => return Err(e.into()),
        };

        let mut config: Self = serde_yaml::from_str(&raw)?;
        if config.hosts_file.as_os_str().is_empty() {
            config.hosts_file = default_hosts_file();
        }
        Ok(config)
    }

    /// Writes the starter document to `path`, creating parent directories
    /// as needed and handing ownership back to the invoking sudo user.
    fn write_default(path: &Path) -> Result<()> {
        let document = serde_yaml::to_string(&Self::starter())?;
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }
        std::fs::write(path, document)?;
        paths::fix_ownership(path);

        tracing::info!(path = %path.display(), "Created default configuration file");
        Ok(())
    }

    /// The document written on first run.
    fn starter() -> Self {
        Self {
            hosts_file: default_hosts_file(),
            domains: vec![
                "x.com".to_string(),
                "twitter.com".to_string(),
                "youtube.com".to_string(),
                "reddit.com".to_string(),
            ],
            subdomains: vec![
                "blog.example.com".to_string(),
                "mail.example.org".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "hosts_file: /tmp/hosts\ndomains:\n  - a.com\nsubdomains:\n  - mail.b.org\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hosts_file, PathBuf::from("/tmp/hosts"));
        assert_eq!(config.domains, vec!["a.com"]);
        assert_eq!(config.subdomains, vec!["mail.b.org"]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "domains:\n  - a.com\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hosts_file, PathBuf::from(DEFAULT_HOSTS_FILE));
        assert!(config.subdomains.is_empty());
    }

    #[test]
    fn empty_hosts_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "hosts_file: \"\"\ndomains: []\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.hosts_file, PathBuf::from(DEFAULT_HOSTS_FILE));
    }

    #[test]
    fn first_run_creates_starter_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("default.yaml");

        let config = Config::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.domains.len(), 4);
        assert_eq!(config.subdomains.len(), 2);
        assert!(config.domains.contains(&"youtube.com".to_string()));
    }

    #[test]
    fn unparseable_document_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "domains: {not a list\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, crate::DblockError::Config(_)));
    }
}
