//! Error taxonomy for the game core.
//!
//! Only configuration problems are surfaced as errors. Illegal selections
//! (wrong phase, already-revealed card, out-of-bounds position) are silent
//! no-ops on the session: a stray click must never corrupt a round.
//! Store failures live in [`crate::store::StoreError`] and are handled with
//! fallbacks rather than propagated.

/// Errors surfaced when setting up a round.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The requested board layout cannot hold a whole number of pairs.
    #[error("board layout {rows}x{columns} must have positive dimensions and an even card count")]
    InvalidConfiguration { rows: usize, columns: usize },

    /// The generator was asked for a card count that cannot be paired.
    #[error("card count {count} must be even and at least 2")]
    InvalidCardCount { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = GameError::InvalidConfiguration { rows: 3, columns: 3 };
        assert_eq!(
            err.to_string(),
            "board layout 3x3 must have positive dimensions and an even card count"
        );
    }

    #[test]
    fn test_invalid_card_count_display() {
        let err = GameError::InvalidCardCount { count: 7 };
        assert_eq!(err.to_string(), "card count 7 must be even and at least 2");
    }
}
