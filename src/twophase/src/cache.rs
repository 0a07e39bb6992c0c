//! The process-wide table bundle.
//!
//! Table construction is the expensive, one-time part of the engine, so it
//! runs once per process behind a `OnceLock`: a single writer builds, every
//! later caller gets the same immutable reference. Searches never touch
//! globals themselves; they take `&Tables` so tests and embedders can also
//! construct private bundles.

use crate::pruning::PruningTables;
use crate::tables::MoveTables;
use crate::{start, success};
use crossbeam_channel::{Receiver, bounded};
use log::info;
use std::sync::OnceLock;
use std::thread;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table construction failed: {0}")]
    Initialization(&'static str),
}

/// Move tables plus pruning tables; everything a search needs.
pub struct Tables {
    pub moves: MoveTables,
    pub pruning: PruningTables,
}

static SHARED: OnceLock<Tables> = OnceLock::new();

impl Tables {
    /// Build a fresh bundle. Takes a few seconds of CPU; prefer
    /// [`Tables::shared`] unless an isolated bundle is required.
    #[must_use]
    pub fn generate() -> Tables {
        info!(start!("Building the two-phase table bundle"));
        let begin = Instant::now();
        let moves = MoveTables::generate();
        let pruning = PruningTables::generate(&moves);
        info!(
            success!("Table bundle ready in {:.3}s"),
            begin.elapsed().as_secs_f64()
        );
        Tables { moves, pruning }
    }

    /// The process-wide bundle, built on first use. Blocks while another
    /// thread is mid-build; concurrent callers never trigger a second
    /// build.
    pub fn shared() -> &'static Tables {
        SHARED.get_or_init(Tables::generate)
    }

    /// Kick off the build off the caller's thread and return a handle
    /// carrying the completion signal.
    #[must_use]
    pub fn build_in_background() -> TablesHandle {
        let (done_tx, done_rx) = bounded(1);
        let spawned = thread::Builder::new()
            .name("twophase-tables".into())
            .spawn(move || {
                let _tables = Tables::shared();
                let _ = done_tx.send(());
            });
        TablesHandle {
            done: done_rx,
            spawn_failed: spawned.is_err(),
        }
    }
}

/// Completion handle for a background table build.
pub struct TablesHandle {
    done: Receiver<()>,
    spawn_failed: bool,
}

impl TablesHandle {
    /// Whether the bundle is usable right now.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        SHARED.get().is_some()
    }

    /// The bundle if it is ready, without blocking.
    #[must_use]
    pub fn try_get(&self) -> Option<&'static Tables> {
        SHARED.get()
    }

    /// Block until the build finishes.
    ///
    /// # Errors
    ///
    /// [`TableError::Initialization`] when the builder thread could not be
    /// spawned or died before completing.
    pub fn wait(&self) -> Result<&'static Tables, TableError> {
        if self.spawn_failed {
            return Err(TableError::Initialization(
                "could not spawn the table builder thread",
            ));
        }
        match self.done.recv() {
            Ok(()) => Ok(Tables::shared()),
            // The sender is gone: either a previous wait consumed the
            // signal, or the builder died. The lock state tells them apart.
            Err(_) => SHARED.get().ok_or(TableError::Initialization(
                "the table builder thread died before completing",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_build_signals_completion() {
        let handle = Tables::build_in_background();
        let tables = handle.wait().unwrap();
        assert!(handle.is_ready());
        assert!(handle.try_get().is_some());
        // a second wait must keep working after the signal was consumed
        assert!(handle.wait().is_ok());
        assert_eq!(
            tables.pruning.phase1_lower_bound(0, 0, 0),
            0,
        );
    }
}
