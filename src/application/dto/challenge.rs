use serde::{Deserialize, Serialize};

use crate::domain::entities::{ChallengeOutcome, StructuredSkillChallenge};
use crate::domain::services::{ChallengeTemplate, CompletionEvaluator, GenerationRequest};
use crate::domain::value_objects::{
    ChallengeId, ChallengeTheme, DifficultyTier, ParseDifficultyError, ParseThemeError,
    PartyContext, MAX_SOLUTIONS,
};

// ============================================================================
// Requests
// ============================================================================

/// Request to generate a challenge
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChallengeRequestDto {
    pub theme: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Falls back to the configured default party when absent
    #[serde(default)]
    pub context: Option<PartyContext>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Seeds cosmetic name/description selection for this request only
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidRequestError {
    #[error(transparent)]
    Theme(#[from] ParseThemeError),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error("minimum_solutions must be at most {max}, got {requested}")]
    TooManySolutions { requested: usize, max: usize },
}

impl GenerateChallengeRequestDto {
    pub fn into_generation_request(
        self,
        default_context: &PartyContext,
    ) -> Result<GenerationRequest, InvalidRequestError> {
        let theme: ChallengeTheme = self.theme.parse()?;
        let difficulty: DifficultyTier = match self.difficulty {
            Some(value) => value.parse()?,
            None => DifficultyTier::default(),
        };

        let context = self.context.unwrap_or_else(|| default_context.clone());
        if context.minimum_solutions > MAX_SOLUTIONS {
            return Err(InvalidRequestError::TooManySolutions {
                requested: context.minimum_solutions,
                max: MAX_SOLUTIONS,
            });
        }

        Ok(GenerationRequest {
            theme,
            difficulty,
            context,
            name: self.name,
            description: self.description,
        })
    }
}

/// Request to move the challenge clock forward
#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceTimeRequestDto {
    pub minutes: u32,
}

// ============================================================================
// Responses
// ============================================================================

/// Row in the active challenge list
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeSummaryDto {
    pub id: ChallengeId,
    pub name: String,
    pub theme: ChallengeTheme,
    pub difficulty: DifficultyTier,
    pub structure: String,
    pub successes: u32,
    pub failures: u32,
    pub attempts: usize,
    pub skills_used: Vec<String>,
    pub participants: Vec<String>,
    pub outcome: ChallengeOutcome,
}

impl From<&StructuredSkillChallenge> for ChallengeSummaryDto {
    fn from(challenge: &StructuredSkillChallenge) -> Self {
        let state = challenge.progression();
        Self {
            id: challenge.id,
            name: challenge.name.clone(),
            theme: challenge.theme,
            difficulty: challenge.difficulty,
            structure: challenge.structure.format(),
            successes: state.current_successes(),
            failures: state.current_failures(),
            attempts: state.attempt_history().len(),
            skills_used: state.used_skills().iter().cloned().collect(),
            participants: state.participating_characters().iter().cloned().collect(),
            outcome: CompletionEvaluator::outcome(&challenge.structure, state),
        }
    }
}

/// Catalog entry shown to hosts choosing a theme
#[derive(Debug, Clone, Serialize)]
pub struct ThemeInfoDto {
    pub theme: ChallengeTheme,
    pub display_name: String,
    pub base_successes: u32,
    pub base_failures: u32,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
}

impl From<&ChallengeTemplate> for ThemeInfoDto {
    fn from(template: &ChallengeTemplate) -> Self {
        Self {
            theme: template.theme,
            display_name: template.theme.display_name().to_string(),
            base_successes: template.base_successes,
            base_failures: template.base_failures,
            primary_skills: template.primary_skills.clone(),
            secondary_skills: template.secondary_skills.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> GenerateChallengeRequestDto {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parses_theme_and_defaults_difficulty() {
        let parsed = request(serde_json::json!({ "theme": "Magical Ritual" }))
            .into_generation_request(&PartyContext::default())
            .unwrap();
        assert_eq!(parsed.theme, ChallengeTheme::MagicalRitual);
        assert_eq!(parsed.difficulty, DifficultyTier::Moderate);
        assert_eq!(parsed.context, PartyContext::default());
    }

    #[test]
    fn test_explicit_context_overrides_default() {
        let parsed = request(serde_json::json!({
            "theme": "chase",
            "difficulty": "hard",
            "context": { "party_size": 6, "party_level": 2 }
        }))
        .into_generation_request(&PartyContext::default().with_minimum_solutions(8))
        .unwrap();
        assert_eq!(parsed.difficulty, DifficultyTier::Hard);
        assert_eq!(parsed.context.party_size, 6);
        assert_eq!(parsed.context.minimum_solutions, 3);
    }

    #[test]
    fn test_unknown_strings_are_rejected() {
        let err = request(serde_json::json!({ "theme": "heist" }))
            .into_generation_request(&PartyContext::default())
            .unwrap_err();
        assert!(matches!(err, InvalidRequestError::Theme(_)));

        let err = request(serde_json::json!({ "theme": "chase", "difficulty": "brutal" }))
            .into_generation_request(&PartyContext::default())
            .unwrap_err();
        assert!(matches!(err, InvalidRequestError::Difficulty(_)));
    }

    #[test]
    fn test_oversized_solution_count_is_rejected() {
        let err = request(serde_json::json!({
            "theme": "chase",
            "context": { "minimum_solutions": 18446744073709551615u64 }
        }))
        .into_generation_request(&PartyContext::default())
        .unwrap_err();
        assert!(matches!(
            err,
            InvalidRequestError::TooManySolutions { requested: usize::MAX, max: MAX_SOLUTIONS }
        ));

        let parsed = request(serde_json::json!({
            "theme": "chase",
            "context": { "minimum_solutions": MAX_SOLUTIONS }
        }))
        .into_generation_request(&PartyContext::default())
        .unwrap();
        assert_eq!(parsed.context.minimum_solutions, MAX_SOLUTIONS);
    }
}
