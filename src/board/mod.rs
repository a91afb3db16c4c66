//! Board model and generation.
//!
//! A board is an ordered sequence of cards, each pairing a stable position
//! with a face identity that appears exactly twice. Generation shuffles the
//! paired identities with an unbiased Fisher-Yates pass.

pub mod card;
pub mod generator;

pub use card::{Card, CardIdentity, CardPosition, CardState};
pub use generator::{shuffled_pairs, Board};
