//! Outbound ports - Interfaces that the application requires from external systems

mod challenge_store_port;
mod narrative_port;

pub use challenge_store_port::{ChallengeStorePort, SharedChallenge};
pub use narrative_port::NarrativePort;
