//! Session lifecycle events.
//!
//! The session appends events to an internal queue as state changes; the
//! presentation layer drains them with
//! [`drain_events`](super::GameSession::drain_events) and translates them
//! into animation, audio, and UI text. The core never renders anything.

use serde::{Deserialize, Serialize};

use crate::board::CardPosition;

/// Something the presentation layer should react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card turned face up (preview or pick).
    CardRevealed { position: CardPosition },

    /// A card turned face down (preview end or mismatch).
    CardHidden { position: CardPosition },

    /// A card locked as part of a found pair.
    CardMatched { position: CardPosition },

    /// Score or combo streak changed (fires on round start and after every
    /// resolution, matched or not).
    ScoreChanged { score: u32, combo_streak: u32 },

    /// All pairs found; the round is over.
    RoundComplete { final_score: u32 },
}
