//! SQLite persistence for Stratus: saved locations, the challenge catalog
//! and per-challenge progress.

pub mod challenges;
pub mod error;
pub mod locations;

pub use challenges::{Challenge, ChallengeStatus, ChallengeStore, Difficulty};
pub use error::{StoreError, StoreResult};
pub use locations::{LocationStore, NewLocation, SaveOutcome, SavedLocation};
