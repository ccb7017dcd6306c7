//! Skill challenge engine - the facade callers construct and hold
//!
//! Generation is the only step that consumes randomness, and only for the
//! cosmetic name and description. Dice arrive pre-rolled on each attempt.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::entities::StructuredSkillChallenge;
use crate::domain::services::{
    CatalogError, CompletionEvaluator, CompletionReport, ConsequenceGenerator,
    DynamicElementCatalog, ProgressSnapshot, ProgressionStateMachine, ScalingRules,
    SkillAttemptInput, SkillAttemptResult, SkillOptionGenerator, SkillSuggestion,
    StructureBuilder, SuggestionAdvisor, SuggestionContext, TemplateCatalog,
};
use crate::domain::value_objects::{ChallengeTheme, DifficultyTier, PartyContext};

/// Parameters for a new challenge
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub theme: ChallengeTheme,
    pub difficulty: DifficultyTier,
    pub context: PartyContext,
    /// Overrides the template's cosmetic name
    pub name: Option<String>,
    /// Overrides the template's cosmetic description
    pub description: Option<String>,
}

impl GenerationRequest {
    pub fn new(theme: ChallengeTheme, difficulty: DifficultyTier) -> Self {
        Self {
            theme,
            difficulty,
            context: PartyContext::default(),
            name: None,
            description: None,
        }
    }

    pub fn with_context(mut self, context: PartyContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillChallengeEngine {
    catalog: TemplateCatalog,
    scaling: ScalingRules,
}

impl SkillChallengeEngine {
    pub fn new(catalog: TemplateCatalog, scaling: ScalingRules) -> Self {
        Self { catalog, scaling }
    }

    pub fn standard() -> Self {
        Self::new(TemplateCatalog::standard(), ScalingRules::standard())
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn generate_challenge<R: Rng + ?Sized>(
        &self,
        request: GenerationRequest,
        rng: &mut R,
    ) -> Result<StructuredSkillChallenge, CatalogError> {
        let template = self.catalog.get(request.theme)?;

        let (structure, scaling) =
            StructureBuilder::new(&self.scaling).build(template, request.difficulty, &request.context);
        let options = SkillOptionGenerator::new(template, request.difficulty, scaling)
            .generate(request.context.minimum_solutions)?;
        let consequences = ConsequenceGenerator::generate(request.theme, request.difficulty);
        let elements = DynamicElementCatalog::generate(template, &structure);

        let name = request
            .name
            .or_else(|| template.names.choose(rng).cloned())
            .unwrap_or_else(|| format!("{} Challenge", request.theme.display_name()));
        let description = request
            .description
            .or_else(|| template.descriptions.choose(rng).cloned())
            .unwrap_or_default();

        Ok(
            StructuredSkillChallenge::new(request.theme, request.difficulty, structure, options)
                .with_name(name)
                .with_description(description)
                .with_consequences(consequences)
                .with_dynamic_elements(elements)
                .with_scaling(scaling),
        )
    }

    pub fn process_attempt(
        &self,
        challenge: &mut StructuredSkillChallenge,
        input: SkillAttemptInput,
    ) -> SkillAttemptResult {
        ProgressionStateMachine::process_attempt(challenge, input)
    }

    pub fn check_completion(&self, challenge: &StructuredSkillChallenge) -> CompletionReport {
        CompletionEvaluator::evaluate(challenge)
    }

    pub fn suggest_skills(
        &self,
        challenge: &StructuredSkillChallenge,
        context: &SuggestionContext,
    ) -> Vec<SkillSuggestion> {
        SuggestionAdvisor::suggest(challenge, context)
    }

    pub fn advance_time(&self, challenge: &mut StructuredSkillChallenge, minutes: u32) -> ProgressSnapshot {
        ProgressionStateMachine::advance_time(challenge, minutes)
    }
}
