//! Application services - Use case implementations
//!
//! Services accept port dependencies and return domain values or DTOs.

pub mod challenge_service;

pub use challenge_service::{ChallengeService, ChallengeServiceError, ChallengeServiceImpl};
