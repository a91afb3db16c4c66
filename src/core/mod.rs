//! Core types: deterministic RNG and the error taxonomy.
//!
//! These are the building blocks the rest of the crate is assembled from;
//! nothing here knows about boards or sessions.

pub mod error;
pub mod rng;

pub use error::GameError;
pub use rng::GameRng;
