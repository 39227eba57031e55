//! Diagnostic log setup.
//!
//! The binary appends structured diagnostics to a rotating file under the
//! per-user log directory. Console output stays reserved for the short
//! user-facing messages printed by the CLI itself.

use crate::error::Result;
use crate::paths;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber writing to the rotating log file.
///
/// Returns the appender's worker guard; dropping it flushes buffered
/// records, so the caller keeps it alive for the lifetime of the process.
///
/// # Errors
///
/// Returns [`crate::DblockError::NoHomeDir`] if the per-user log directory
/// cannot be resolved, or [`crate::DblockError::Io`] if it cannot be
/// created.
pub fn init() -> Result<WorkerGuard> {
    let dir = paths::log_dir()?;
    paths::ensure_dir(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, "dblock.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();

    Ok(guard)
}
