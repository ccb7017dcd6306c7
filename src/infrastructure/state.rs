//! Shared application state

use std::sync::Arc;

use tracing::info;

use crate::application::ports::outbound::NarrativePort;
use crate::application::services::ChallengeServiceImpl;
use crate::domain::services::SkillChallengeEngine;
use crate::domain::value_objects::PartyContext;
use crate::infrastructure::config::{AppConfig, NarrativeBackend};
use crate::infrastructure::narrative::BuiltinNarrator;
use crate::infrastructure::ollama::OllamaClient;
use crate::infrastructure::persistence::InMemoryChallengeStore;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub challenge_service: ChallengeServiceImpl,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let narrator: Arc<dyn NarrativePort> = match config.narrative_backend {
            NarrativeBackend::Builtin => Arc::new(BuiltinNarrator::new()),
            NarrativeBackend::Ollama => {
                info!("Using Ollama narrator at {}", config.ollama_base_url);
                Arc::new(OllamaClient::new(&config.ollama_base_url, &config.ollama_model))
            }
        };

        let default_context =
            PartyContext::default().with_minimum_solutions(config.default_minimum_solutions);

        let mut challenge_service = ChallengeServiceImpl::new(
            SkillChallengeEngine::standard(),
            Arc::new(InMemoryChallengeStore::new()),
            narrator,
        )
        .with_default_context(default_context);
        if let Some(seed) = config.challenge_seed {
            challenge_service = challenge_service.with_seed(seed);
        }

        Self {
            config,
            challenge_service,
        }
    }
}
