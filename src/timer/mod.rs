//! Cancellable delayed actions on a single logical thread.
//!
//! The game's timed phases (preview reveal/hide, resolution pause, the
//! round-over return to idle) are modeled as entries in a [`DelayQueue`]:
//! schedule an action after a duration, keep the [`TimerId`] handle, and
//! drive the queue with [`advance`](DelayQueue::advance). Nothing fires
//! until the owner advances time, so tests control the clock completely.
//!
//! ## Behavior
//!
//! - `schedule()`: registers an action due after `delay`, returns a handle
//! - `cancel()`: revokes a pending action by handle
//! - `advance()`: moves the internal clock forward and returns every action
//!   that came due, in deadline order
//!
//! There is no background thread and no wall clock; the queue only knows
//! the time its owner has fed it.

use std::time::Duration;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Handle to a scheduled action, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer {}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    deadline: Duration,
    action: T,
}

/// Single-threaded delay queue.
///
/// Generic over the action payload; the session instantiates it with its
/// own timed-action enum.
#[derive(Clone, Debug)]
pub struct DelayQueue<T> {
    /// Total time fed through `advance` since creation.
    now: Duration,
    next_id: u64,
    entries: FxHashMap<u64, Entry<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: FxHashMap::default(),
        }
    }
}

impl<T> DelayQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, action: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                deadline: self.now + delay,
                action,
            },
        );
        TimerId(id)
    }

    /// Cancel a pending action.
    ///
    /// Returns true if the action was still pending and is now revoked.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id.0).is_some()
    }

    /// Cancel every pending action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get the number of pending actions.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is scheduled.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the clock and collect every action that came due.
    ///
    /// Due actions are returned in deadline order (ties break by scheduling
    /// order), so a handler that schedules a follow-up only sees that
    /// follow-up fire on a later `advance` call.
    pub fn advance(&mut self, elapsed: Duration) -> SmallVec<[T; 2]> {
        self.now += elapsed;

        let mut due: SmallVec<[(Duration, u64); 2]> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= self.now)
            .map(|(&id, entry)| (entry.deadline, id))
            .collect();
        due.sort_unstable();

        due.into_iter()
            .filter_map(|(_, id)| self.entries.remove(&id))
            .map(|entry| entry.action)
            .collect()
    }
}
