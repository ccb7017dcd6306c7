//! Narrative port - flavor text from an external writer
//!
//! The engine never depends on this text. Callers fall back to the engine's
//! own prose when a provider fails.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::ChallengeOutcome;
use crate::domain::value_objects::ChallengeTheme;

#[async_trait]
pub trait NarrativePort: Send + Sync {
    /// Scene-setting prose for a newly generated challenge
    async fn opening(&self, theme: ChallengeTheme, name: &str) -> Result<String>;

    /// Closing prose once a challenge reaches a terminal outcome
    async fn conclusion(
        &self,
        theme: ChallengeTheme,
        outcome: ChallengeOutcome,
        successes: u32,
        failures: u32,
    ) -> Result<String>;
}
