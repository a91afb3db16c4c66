//! Board generation: paired identities, unbiased shuffle.
//!
//! ## Algorithm
//!
//! For `n` cards, emit identities `0..n/2` twice each, then run an in-place
//! Fisher-Yates pass: position `i` swaps with a uniform index in `[i, n)`.
//! Every permutation of the paired multiset is equally likely.
//!
//! Generation is pure with respect to its random source: the same seeded
//! [`GameRng`] always produces the same board.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, GameRng};

use super::card::{Card, CardIdentity, CardPosition};

/// Generate a shuffled sequence of paired card identities.
///
/// Returns `total_cards` identities in board order, each value appearing
/// exactly twice.
///
/// # Errors
///
/// [`GameError::InvalidCardCount`] if `total_cards` is odd or less than 2.
pub fn shuffled_pairs(
    total_cards: usize,
    rng: &mut GameRng,
) -> Result<Vec<CardIdentity>, GameError> {
    if total_cards < 2 || total_cards % 2 != 0 {
        return Err(GameError::InvalidCardCount { count: total_cards });
    }

    let pair_count = total_cards / 2;
    let mut identities = Vec::with_capacity(total_cards);
    for face in 0..pair_count as u32 {
        identities.push(CardIdentity::new(face));
        identities.push(CardIdentity::new(face));
    }

    // Fisher-Yates: uniform index in [i, n) swapped into i.
    for i in 0..total_cards {
        let j = rng.gen_range_usize(i..total_cards);
        identities.swap(i, j);
    }

    Ok(identities)
}

/// An ordered board of cards for one round.
///
/// Created once per round, owned exclusively by the session, and replaced
/// wholesale when a new round starts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cards: Vec<Card>,
}

impl Board {
    /// Generate a shuffled board for the given layout.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidCardCount`] if `rows * columns` is odd or less
    /// than 2.
    pub fn generate(rows: usize, columns: usize, rng: &mut GameRng) -> Result<Self, GameError> {
        let identities = shuffled_pairs(rows * columns, rng)?;

        let cards = identities
            .into_iter()
            .enumerate()
            .map(|(i, identity)| Card::new(CardPosition::new(i as u16), identity))
            .collect();

        Ok(Self { rows, columns, cards })
    }

    /// Get the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Get the total card count.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Get the number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// Get the card at a position, if the position is on the board.
    #[must_use]
    pub fn card(&self, position: CardPosition) -> Option<&Card> {
        self.cards.get(position.index())
    }

    /// Iterate over all cards in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Get a mutable card at a position.
    pub(crate) fn card_mut(&mut self, position: CardPosition) -> Option<&mut Card> {
        self.cards.get_mut(position.index())
    }

    /// Iterate over all cards mutably.
    pub(crate) fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }
}
