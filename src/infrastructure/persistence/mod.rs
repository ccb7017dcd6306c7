//! Persistence adapters
//!
//! Challenge state is held in memory only; nothing survives a restart.

mod in_memory_challenge_store;

pub use in_memory_challenge_store::InMemoryChallengeStore;
