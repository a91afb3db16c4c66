//! Session phases.

use serde::{Deserialize, Serialize};

/// Where the session currently is in its round lifecycle.
///
/// Transitions are driven by [`GameSession`](super::GameSession) alone:
/// `start_round` from any phase, `select_card` in the two awaiting phases,
/// and the delay queue for everything scripted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No active board; a round may be started.
    #[default]
    Idle,
    /// Scripted preview: cards are shown, then hidden. Non-interactive.
    Previewing,
    /// Waiting for the first card of a pick-pair.
    AwaitingFirstPick,
    /// One card is face up; waiting for a second, different card.
    AwaitingSecondPick,
    /// Both picks are face up; resolution is scheduled.
    Resolving,
    /// All pairs found. Terminal until `start_round` or the timed return
    /// to idle.
    RoundComplete,
}

impl SessionPhase {
    /// Check whether `select_card` is accepted in this phase.
    #[must_use]
    pub fn accepts_selection(self) -> bool {
        matches!(
            self,
            SessionPhase::AwaitingFirstPick | SessionPhase::AwaitingSecondPick
        )
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Previewing => "Previewing",
            SessionPhase::AwaitingFirstPick => "AwaitingFirstPick",
            SessionPhase::AwaitingSecondPick => "AwaitingSecondPick",
            SessionPhase::Resolving => "Resolving",
            SessionPhase::RoundComplete => "RoundComplete",
        };
        write!(f, "{name}")
    }
}
