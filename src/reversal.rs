//! Timed reversal of a blocking operation.
//!
//! After an enable or disable succeeds, the caller may schedule the inverse
//! operation behind a delay. The delay races against an interruption future
//! supplied by the caller (the CLI wires up SIGINT/SIGTERM listeners); the
//! first to complete settles the race and the loser is simply dropped —
//! neither branch holds a resource needing release.

use crate::error::Result;
use std::future::Future;
use std::time::Duration;

/// How a scheduled reversal settled.
#[derive(Debug)]
pub enum ReversalOutcome {
    /// The delay elapsed and the inverse operation ran, with this result.
    Fired(Result<()>),
    /// The interruption future completed first; the inverse operation was
    /// never run.
    Interrupted,
}

/// Waits `delay`, then runs `inverse` — unless `interrupt` completes first.
///
/// Exactly one of the two outcomes occurs. The inverse operation only
/// starts after the full delay has elapsed, so it never overlaps the
/// caller's own file access. A zero delay is the caller's signal that no
/// reversal is wanted; callers guard on it and never start the race.
pub async fn race<F, S>(delay: Duration, inverse: F, interrupt: S) -> ReversalOutcome
where
    F: FnOnce() -> Result<()>,
    S: Future<Output = ()>,
{
    tokio::select! {
        () = tokio::time::sleep(delay) => ReversalOutcome::Fired(inverse()),
        () = interrupt => ReversalOutcome::Interrupted,
    }
}
