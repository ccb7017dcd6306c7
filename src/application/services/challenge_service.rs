//! Challenge Service - Application service for running skill challenges
//!
//! Wraps the domain engine with storage, narrative flavor and logging. Each
//! challenge sits behind its own mutex, so attempts on one challenge are
//! applied one at a time while different challenges proceed in parallel.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::application::dto::{ChallengeSummaryDto, GenerateChallengeRequestDto, ThemeInfoDto};
use crate::application::ports::outbound::{ChallengeStorePort, NarrativePort, SharedChallenge};
use crate::domain::entities::StructuredSkillChallenge;
use crate::domain::services::{
    CatalogError, CompletionReport, ProgressSnapshot, SkillAttemptInput, SkillAttemptResult,
    SkillChallengeEngine, SkillSuggestion, SuggestionContext,
};
use crate::domain::value_objects::{ChallengeId, PartyContext};

/// Failures a caller can act on. Everything else is an opaque `anyhow` error.
#[derive(Debug, thiserror::Error)]
pub enum ChallengeServiceError {
    #[error("Challenge not found: {0}")]
    NotFound(ChallengeId),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Challenge generation failed: {0}")]
    Generation(#[from] CatalogError),
}

/// Challenge service trait defining the application use cases
#[async_trait]
pub trait ChallengeService: Send + Sync {
    /// Themes the engine can generate, with their base structure
    async fn list_themes(&self) -> Result<Vec<ThemeInfoDto>>;

    /// Generate and store a new challenge
    async fn generate_challenge(
        &self,
        request: GenerateChallengeRequestDto,
    ) -> Result<StructuredSkillChallenge>;

    /// Snapshot of a stored challenge
    async fn get_challenge(&self, id: ChallengeId) -> Result<StructuredSkillChallenge>;

    /// Summaries of every stored challenge, oldest first
    async fn list_challenges(&self) -> Result<Vec<ChallengeSummaryDto>>;

    /// Resolve one pre-rolled attempt
    async fn process_attempt(
        &self,
        id: ChallengeId,
        input: SkillAttemptInput,
    ) -> Result<SkillAttemptResult>;

    async fn check_completion(&self, id: ChallengeId) -> Result<CompletionReport>;

    async fn suggest_skills(
        &self,
        id: ChallengeId,
        context: SuggestionContext,
    ) -> Result<Vec<SkillSuggestion>>;

    /// Move the challenge clock forward
    async fn advance_time(&self, id: ChallengeId, minutes: u32) -> Result<ProgressSnapshot>;

    /// End the session and drop the challenge
    async fn end_challenge(&self, id: ChallengeId) -> Result<()>;
}

/// Default implementation of ChallengeService using port abstractions
#[derive(Clone)]
pub struct ChallengeServiceImpl {
    engine: Arc<SkillChallengeEngine>,
    store: Arc<dyn ChallengeStorePort>,
    narrator: Arc<dyn NarrativePort>,
    default_context: PartyContext,
    rng: Arc<Mutex<StdRng>>,
}

impl ChallengeServiceImpl {
    pub fn new(
        engine: SkillChallengeEngine,
        store: Arc<dyn ChallengeStorePort>,
        narrator: Arc<dyn NarrativePort>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
            narrator,
            default_context: PartyContext::default(),
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    /// Party used when a generation request carries no context
    pub fn with_default_context(mut self, context: PartyContext) -> Self {
        self.default_context = context;
        self
    }

    /// Seed the shared generator so cosmetic picks repeat across runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    async fn load(&self, id: ChallengeId) -> Result<SharedChallenge> {
        self.store
            .get(id)
            .await
            .context("Failed to get challenge from store")?
            .ok_or_else(|| ChallengeServiceError::NotFound(id).into())
    }
}

#[async_trait]
impl ChallengeService for ChallengeServiceImpl {
    #[instrument(skip(self))]
    async fn list_themes(&self) -> Result<Vec<ThemeInfoDto>> {
        Ok(self.engine.catalog().templates().map(ThemeInfoDto::from).collect())
    }

    #[instrument(skip(self), fields(theme = %request.theme))]
    async fn generate_challenge(
        &self,
        request: GenerateChallengeRequestDto,
    ) -> Result<StructuredSkillChallenge> {
        let seed = request.seed;
        let generation = request
            .into_generation_request(&self.default_context)
            .map_err(|e| ChallengeServiceError::InvalidRequest(e.to_string()))?;
        let keep_description = generation.description.is_some();

        let mut challenge = match seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.engine.generate_challenge(generation, &mut rng)
            }
            None => {
                let mut rng = self.rng.lock().await;
                self.engine.generate_challenge(generation, &mut *rng)
            }
        }
        .map_err(ChallengeServiceError::Generation)?;

        if !keep_description {
            match self.narrator.opening(challenge.theme, &challenge.name).await {
                Ok(opening) if !opening.trim().is_empty() => challenge.description = opening,
                Ok(_) => debug!("Narrative provider returned an empty opening"),
                Err(e) => warn!(error = %e, "Narrative provider failed, keeping template description"),
            }
        }

        let shared = self
            .store
            .insert(challenge)
            .await
            .context("Failed to store challenge")?;
        let challenge = shared.lock().await.clone();

        info!(
            challenge_id = %challenge.id,
            structure = %challenge.structure.format(),
            options = challenge.skill_options.len(),
            "Generated challenge: {}",
            challenge.name
        );
        Ok(challenge)
    }

    #[instrument(skip(self))]
    async fn get_challenge(&self, id: ChallengeId) -> Result<StructuredSkillChallenge> {
        debug!(challenge_id = %id, "Fetching challenge");
        let shared = self.load(id).await?;
        let challenge = shared.lock().await.clone();
        Ok(challenge)
    }

    #[instrument(skip(self))]
    async fn list_challenges(&self) -> Result<Vec<ChallengeSummaryDto>> {
        debug!("Listing challenges");
        let handles = self
            .store
            .list()
            .await
            .context("Failed to list challenges from store")?;

        let mut rows = Vec::with_capacity(handles.len());
        for handle in handles {
            let challenge = handle.lock().await;
            rows.push((challenge.created_at, ChallengeSummaryDto::from(&*challenge)));
        }
        rows.sort_by_key(|(created_at, _)| *created_at);
        Ok(rows.into_iter().map(|(_, summary)| summary).collect())
    }

    #[instrument(skip(self, input), fields(skill = %input.skill, character = %input.character_id))]
    async fn process_attempt(
        &self,
        id: ChallengeId,
        input: SkillAttemptInput,
    ) -> Result<SkillAttemptResult> {
        let shared = self.load(id).await?;
        let mut challenge = shared.lock().await;

        let result = self.engine.process_attempt(&mut challenge, input);
        match (&result.rejection, result.outcome) {
            (Some(rejection), _) => {
                warn!(challenge_id = %id, reason = ?rejection, "Attempt rejected: {}", result.message)
            }
            (None, Some(outcome)) => info!(
                challenge_id = %id,
                outcome = outcome.display_name(),
                successes = result.progress.successes,
                failures = result.progress.failures,
                "Attempt resolved"
            ),
            (None, None) => {}
        }
        if result.progress.is_complete && result.rejection.is_none() {
            info!(challenge_id = %id, "Challenge reached a conclusion");
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn check_completion(&self, id: ChallengeId) -> Result<CompletionReport> {
        let shared = self.load(id).await?;
        let challenge = shared.lock().await.clone();

        let mut report = self.engine.check_completion(&challenge);
        if report.is_complete {
            match self
                .narrator
                .conclusion(challenge.theme, report.outcome, report.successes, report.failures)
                .await
            {
                Ok(text) if !text.trim().is_empty() => report.narrative_conclusion = Some(text),
                Ok(_) => debug!("Narrative provider returned an empty conclusion"),
                Err(e) => warn!(error = %e, "Narrative provider failed, keeping engine conclusion"),
            }
        }

        debug!(challenge_id = %id, outcome = report.outcome.display_name(), "Checked completion");
        Ok(report)
    }

    #[instrument(skip(self, context))]
    async fn suggest_skills(
        &self,
        id: ChallengeId,
        context: SuggestionContext,
    ) -> Result<Vec<SkillSuggestion>> {
        let shared = self.load(id).await?;
        let challenge = shared.lock().await;
        Ok(self.engine.suggest_skills(&challenge, &context))
    }

    #[instrument(skip(self))]
    async fn advance_time(&self, id: ChallengeId, minutes: u32) -> Result<ProgressSnapshot> {
        let shared = self.load(id).await?;
        let mut challenge = shared.lock().await;

        let snapshot = self.engine.advance_time(&mut challenge, minutes);
        info!(
            challenge_id = %id,
            elapsed = challenge.progression().time_elapsed_minutes(),
            "Advanced challenge clock by {} minutes",
            minutes
        );
        Ok(snapshot)
    }

    #[instrument(skip(self))]
    async fn end_challenge(&self, id: ChallengeId) -> Result<()> {
        let removed = self
            .store
            .remove(id)
            .await
            .context("Failed to remove challenge from store")?;
        if !removed {
            return Err(ChallengeServiceError::NotFound(id).into());
        }

        info!(challenge_id = %id, "Ended challenge");
        Ok(())
    }
}
