//! Scoring and combo bookkeeping.

use serde::{Deserialize, Serialize};

/// Per-round scoring state.
///
/// ## Combo rule
///
/// `combo_streak` counts consecutive matches since the last mismatch (or
/// round start) plus one, so it sits at 1 when no streak is running. A
/// match awards:
///
/// - streak 1 or 2: the base award
/// - streak above 2: the award times `streak - 1`
///
/// and then bumps the streak. Any mismatch collapses the streak back to 1
/// and leaves the score untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    score: u32,
    combo_streak: u32,
    moves: u32,
    matches_found: u32,
    total_pairs: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScoreState {
    /// Create scoring state for a round with `total_pairs` pairs.
    #[must_use]
    pub fn new(total_pairs: u32) -> Self {
        Self {
            score: 0,
            combo_streak: 1,
            moves: 0,
            matches_found: 0,
            total_pairs,
        }
    }

    /// Get the current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Get the current combo streak (1 when no streak is running).
    #[must_use]
    pub fn combo_streak(&self) -> u32 {
        self.combo_streak
    }

    /// Get the number of completed pick-pairs.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Get the number of pairs found so far.
    #[must_use]
    pub fn matches_found(&self) -> u32 {
        self.matches_found
    }

    /// Get the number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    /// Check whether every pair has been found.
    #[must_use]
    pub fn is_round_won(&self) -> bool {
        self.total_pairs > 0 && self.matches_found == self.total_pairs
    }

    /// Apply a score award. Zero means a mismatch and collapses the streak.
    pub fn apply_award(&mut self, award: u32) {
        if award == 0 {
            self.combo_streak = 1;
            return;
        }

        if self.combo_streak > 2 {
            self.score += award * (self.combo_streak - 1);
        } else {
            self.score += award;
        }

        self.combo_streak += 1;
    }

    /// Record a completed pick-pair and whether it matched.
    pub fn complete_move(&mut self, matched: bool) {
        self.moves += 1;
        if matched {
            self.matches_found += 1;
        }
    }
}
