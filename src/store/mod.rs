//! Best-score persistence.
//!
//! The session consumes a single-integer store through [`BestScoreStore`].
//! Two implementations ship with the crate: [`MemoryBestScore`] for tests
//! and ephemeral play, and [`FileBestScore`] for a bincode-encoded record
//! on disk. Format and location beyond that are the caller's business.
//!
//! The stored value is monotonic: [`record_if_higher`] writes only when the
//! new score strictly exceeds the stored one. Store failures never block a
//! round - an unreadable store reads as 0, a failed write is logged and
//! dropped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors from a best-score store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("saved score record is corrupt: {0}")]
    Corrupt(#[from] bincode::Error),
}

/// Single persisted integer, read at idle and written on round completion.
pub trait BestScoreStore {
    /// Read the stored best score.
    fn read_best(&self) -> Result<u32, StoreError>;

    /// Overwrite the stored best score.
    fn write_best(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Read the best score, treating an unreadable store as 0.
pub fn best_or_default<S: BestScoreStore + ?Sized>(store: &S) -> u32 {
    match store.read_best() {
        Ok(best) => best,
        Err(err) => {
            warn!(error = %err, "best score unreadable, defaulting to 0");
            0
        }
    }
}

/// Persist `score` if it strictly exceeds the stored best.
///
/// Returns the best score after the call. Write failures are logged and
/// swallowed; the returned value then reflects the attempted new best so
/// the caller can still display it.
pub fn record_if_higher<S: BestScoreStore + ?Sized>(store: &mut S, score: u32) -> u32 {
    let current = best_or_default(store);
    if score <= current {
        return current;
    }

    if let Err(err) = store.write_best(score) {
        warn!(score, error = %err, "failed to persist best score");
    }
    score
}

/// In-memory store, starting at 0.
#[derive(Clone, Debug, Default)]
pub struct MemoryBestScore {
    best: u32,
}

impl MemoryBestScore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a pre-existing best score.
    #[must_use]
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryBestScore {
    fn read_best(&self) -> Result<u32, StoreError> {
        Ok(self.best)
    }

    fn write_best(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = score;
        Ok(())
    }
}

/// On-disk record wrapping the persisted value.
#[derive(Debug, Serialize, Deserialize)]
struct SavedScore {
    best: u32,
}

/// File-backed store holding one bincode-encoded record.
///
/// A missing file reads as 0 (first run); anything else unreadable is an
/// error for the caller to fall back on.
#[derive(Clone, Debug)]
pub struct FileBestScore {
    path: PathBuf,
}

impl FileBestScore {
    /// Create a store backed by the given path.
    ///
    /// The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileBestScore {
    fn read_best(&self) -> Result<u32, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };

        let saved: SavedScore = bincode::deserialize(&bytes)?;
        Ok(saved.best)
    }

    fn write_best(&mut self, score: u32) -> Result<(), StoreError> {
        let bytes = bincode::serialize(&SavedScore { best: score })?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}
