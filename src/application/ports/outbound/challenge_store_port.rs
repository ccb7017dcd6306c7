//! Challenge store port - where running challenges live between requests

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::StructuredSkillChallenge;
use crate::domain::value_objects::ChallengeId;

/// A stored challenge. The mutex serialises attempts on one challenge.
pub type SharedChallenge = Arc<Mutex<StructuredSkillChallenge>>;

#[async_trait]
pub trait ChallengeStorePort: Send + Sync {
    /// Store a freshly generated challenge and hand back its shared handle
    async fn insert(&self, challenge: StructuredSkillChallenge) -> Result<SharedChallenge>;

    async fn get(&self, id: ChallengeId) -> Result<Option<SharedChallenge>>;

    /// All stored challenges, in no particular order
    async fn list(&self) -> Result<Vec<SharedChallenge>>;

    /// Drop a challenge. Returns false when nothing was stored under `id`.
    async fn remove(&self, id: ChallengeId) -> Result<bool>;
}
