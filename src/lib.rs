//! # memory-pairs
//!
//! A headless memory-matching ("pairs") game core.
//!
//! A board of face-down cards is revealed in pairs on selection; matching
//! pairs score points with an escalating combo multiplier; the round ends
//! when all pairs are found.
//!
//! ## Design Principles
//!
//! 1. **Headless**: No rendering, audio, or input handling. The session
//!    emits plain-data events; a presentation layer of the caller's
//!    choosing turns them into flips, sounds, and text.
//!
//! 2. **Deterministic**: All randomness flows through a seeded RNG, so any
//!    board can be reproduced and every test controls its shuffle.
//!
//! 3. **Explicit Time**: Timed phases (preview, resolution pause, round
//!    over) live on a delay queue driven by the caller. The core never
//!    reads a clock; tests advance time instantly.
//!
//! ## Modules
//!
//! - `core`: Deterministic RNG, error taxonomy
//! - `board`: Card model, paired-identity generation, Fisher-Yates shuffle
//! - `timer`: Cancellable single-threaded delay queue
//! - `session`: The round state machine - selection protocol, scoring,
//!   scripted sequences, lifecycle events
//! - `store`: Best-score persistence boundary and implementations

pub mod board;
pub mod core;
pub mod session;
pub mod store;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{GameError, GameRng};

pub use crate::board::{shuffled_pairs, Board, Card, CardIdentity, CardPosition, CardState};

pub use crate::session::{GameSession, ScoreState, SessionConfig, SessionEvent, SessionPhase};

pub use crate::store::{
    best_or_default, record_if_higher, BestScoreStore, FileBestScore, MemoryBestScore, StoreError,
};

pub use crate::timer::{DelayQueue, TimerId};
