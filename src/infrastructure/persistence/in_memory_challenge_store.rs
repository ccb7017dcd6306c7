//! In-memory challenge store
//!
//! Challenges live for the lifetime of the process. The registry lock is
//! only held long enough to clone a handle; play happens on the
//! per-challenge mutex.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::outbound::{ChallengeStorePort, SharedChallenge};
use crate::domain::entities::StructuredSkillChallenge;
use crate::domain::value_objects::ChallengeId;

#[derive(Default)]
pub struct InMemoryChallengeStore {
    challenges: RwLock<HashMap<ChallengeId, SharedChallenge>>,
}

impl InMemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeStorePort for InMemoryChallengeStore {
    async fn insert(&self, challenge: StructuredSkillChallenge) -> Result<SharedChallenge> {
        let id = challenge.id;
        let shared = Arc::new(Mutex::new(challenge));
        self.challenges.write().await.insert(id, Arc::clone(&shared));
        Ok(shared)
    }

    async fn get(&self, id: ChallengeId) -> Result<Option<SharedChallenge>> {
        Ok(self.challenges.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<SharedChallenge>> {
        Ok(self.challenges.read().await.values().cloned().collect())
    }

    async fn remove(&self, id: ChallengeId) -> Result<bool> {
        Ok(self.challenges.write().await.remove(&id).is_some())
    }
}
