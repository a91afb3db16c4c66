//! Card data model.
//!
//! ## Identity vs position
//!
//! Every card carries two numbers that must not be confused:
//!
//! - `CardPosition`: where the card sits on the board. Stable for the
//!   lifetime of a round, assigned once at generation.
//! - `CardIdentity`: which face the card shows. Shared by exactly two
//!   cards per round - the matched pair.
//!
//! Pair matching compares identities, never positions.

use serde::{Deserialize, Serialize};

/// Face identifier shared by exactly two cards per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardIdentity(pub u32);

impl CardIdentity {
    /// Create a new card identity.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw identity value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face {}", self.0)
    }
}

/// Board slot identifier, 0-based in board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardPosition(pub u16);

impl CardPosition {
    /// Create a new board position.
    #[must_use]
    pub const fn new(position: u16) -> Self {
        Self(position)
    }

    /// Get the position as a 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all positions on a board with `card_count` cards.
    pub fn all(card_count: usize) -> impl Iterator<Item = CardPosition> {
        (0..card_count as u16).map(CardPosition)
    }
}

impl std::fmt::Display for CardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position {}", self.0)
    }
}

/// Lifecycle of a single card within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face hidden; the card can be selected.
    #[default]
    FaceDown,
    /// Face showing; either previewed or part of the current pick.
    FaceUp,
    /// Pair found; the card is out of play for the rest of the round.
    Matched,
}

/// One board slot: a position, a face, and the current state.
///
/// State transitions are driven only by the session; callers get read
/// access for display and inspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    position: CardPosition,
    identity: CardIdentity,
    state: CardState,
}

impl Card {
    /// Create a new face-down card.
    #[must_use]
    pub fn new(position: CardPosition, identity: CardIdentity) -> Self {
        Self {
            position,
            identity,
            state: CardState::FaceDown,
        }
    }

    /// Get the card's board position.
    #[must_use]
    pub fn position(&self) -> CardPosition {
        self.position
    }

    /// Get the card's face identity.
    #[must_use]
    pub fn identity(&self) -> CardIdentity {
        self.identity
    }

    /// Get the card's current state.
    #[must_use]
    pub fn state(&self) -> CardState {
        self.state
    }

    /// Check whether the card can currently be selected.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.state == CardState::FaceDown
    }

    /// Turn the card face up.
    pub(crate) fn reveal(&mut self) {
        self.state = CardState::FaceUp;
    }

    /// Turn the card face down.
    pub(crate) fn conceal(&mut self) {
        self.state = CardState::FaceDown;
    }

    /// Lock the card as part of a found pair.
    pub(crate) fn set_matched(&mut self) {
        self.state = CardState::Matched;
    }
}
