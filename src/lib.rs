//! # dblock
//!
//! Block access to a configurable list of domains by managing a marked
//! section inside the hosts file, with optional timed undo.
//!
//! The tool owns exactly one region of the target file, delimited by the
//! literal lines `# BEGIN dblock` and `# END dblock`. Everything outside
//! that region is preserved byte for byte; the section itself is recomputed
//! from scratch on every change, so manual edits or duplicated markers are
//! self-healed on the next run.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dblock::{Config, HostsBlocker};
//!
//! let config = Config::load(&dblock::paths::config_file()?)?;
//! let blocker = HostsBlocker::for_config(&config)?;
//!
//! // Insert the managed section (requires root for /etc/hosts).
//! blocker.enable(&config)?;
//!
//! // Query state.
//! let status = blocker.status()?;
//!
//! // Remove the section again.
//! blocker.disable()?;
//! ```
//!
//! ## Timed undo
//!
//! A nonzero `-t` schedules the inverse operation behind a delay and races
//! it against SIGINT/SIGTERM — see [`reversal`]. The inverse runs at most
//! once; an interruption abandons it without rolling back the change
//! already applied.
//!
//! ## Backups
//!
//! Every mutating operation first snapshots the unmodified file to
//! `~/.dblock/backups/hosts.bak`. The snapshot is overwritten each time and
//! exists for manual recovery only.
//!
//! ## Permissions
//!
//! Writing `/etc/hosts` requires root. The CLI refuses `enable`/`disable`
//! without it; the library reports a permission error from the `access(2)`
//! precheck before touching the file.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod blocker;
pub mod config;
pub mod editor;
pub mod entries;
pub mod error;
pub mod logging;
pub mod paths;
pub mod reversal;

pub use blocker::{BlockingStatus, HostsBlocker};
pub use config::Config;
pub use error::{DblockError, Result};
pub use reversal::ReversalOutcome;
