//! Suggestion advisor - ranks skill options for the next attempt
//!
//! Advisory only. Nothing here changes challenge state.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{SkillCategory, StructuredSkillChallenge};
use crate::domain::value_objects::MomentumLevel;

const BASE_SCORE: u32 = 50;
const PRIMARY_BONUS: u32 = 20;
const FRESH_SKILL_BONUS: u32 = 15;
const SYNERGY_BONUS: u32 = 10;
const CREATIVE_RECOVERY_BONUS: u32 = 15;

pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionContext {
    #[serde(default)]
    pub available_characters: Vec<String>,
}

impl SuggestionContext {
    pub fn with_characters(characters: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            available_characters: characters.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSuggestion {
    pub skill: String,
    pub category: SkillCategory,
    pub dc: i32,
    pub score: u32,
    pub reasons: Vec<String>,
    pub suggested_character: Option<String>,
}

pub struct SuggestionAdvisor;

impl SuggestionAdvisor {
    pub fn suggest(challenge: &StructuredSkillChallenge, context: &SuggestionContext) -> Vec<SkillSuggestion> {
        let state = challenge.progression();
        let previous_skill = state.last_attempt().map(|a| a.skill.as_str());
        let struggling = state.momentum().level == MomentumLevel::Negative;
        let character = Self::pick_character(challenge, context);

        let mut suggestions: Vec<SkillSuggestion> = challenge
            .skill_options
            .iter()
            .filter(|option| {
                option
                    .usage_limit
                    .map_or(true, |limit| state.attempts_with(&option.skill) < limit as usize)
            })
            .map(|option| {
                let mut score = BASE_SCORE;
                let mut reasons = Vec::new();

                if option.category == SkillCategory::Primary {
                    score += PRIMARY_BONUS;
                    reasons.push(format!(
                        "{} approach for this challenge",
                        option.category.display_name()
                    ));
                }
                if !state.has_used_skill(&option.skill) {
                    score += FRESH_SKILL_BONUS;
                    reasons.push("Not yet attempted".to_string());
                }
                if let Some(previous) = previous_skill {
                    if option.synergy_with(previous).is_some() {
                        score += SYNERGY_BONUS;
                        reasons.push(format!("Builds on the previous {} attempt", previous));
                    }
                }
                if struggling && option.category == SkillCategory::Creative {
                    score += CREATIVE_RECOVERY_BONUS;
                    reasons.push("A fresh angle could turn things around".to_string());
                }

                SkillSuggestion {
                    skill: option.skill.clone(),
                    category: option.category,
                    dc: option.base_dc,
                    score,
                    reasons,
                    suggested_character: character.clone(),
                }
            })
            .collect();

        // sort_by is stable, so ties keep catalog order
        suggestions.sort_by(|a, b| b.score.cmp(&a.score));
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    fn pick_character(challenge: &StructuredSkillChallenge, context: &SuggestionContext) -> Option<String> {
        let state = challenge.progression();
        context
            .available_characters
            .iter()
            .find(|c| !state.has_participated(c))
            .or_else(|| context.available_characters.first())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        ChallengeAttempt, ChallengeStructure, MomentumState, SkillOption, SkillSynergy,
    };
    use crate::domain::value_objects::{AttemptOutcome, ChallengeTheme, DifficultyTier};

    fn challenge(options: Vec<SkillOption>) -> StructuredSkillChallenge {
        StructuredSkillChallenge::new(
            ChallengeTheme::Investigation,
            DifficultyTier::Moderate,
            ChallengeStructure::new(5, 2),
            options,
        )
    }

    fn standard_options() -> Vec<SkillOption> {
        vec![
            SkillOption::new("Investigation", SkillCategory::Primary, 15),
            SkillOption::new("Insight", SkillCategory::Primary, 16)
                .with_synergy(SkillSynergy::new("Investigation")),
            SkillOption::new("History", SkillCategory::Secondary, 16).with_usage_limit(1),
            SkillOption::new("Creative Approach", SkillCategory::Creative, 14).with_usage_limit(2),
        ]
    }

    #[test]
    fn test_fresh_challenge_scores() {
        let c = challenge(standard_options());
        let suggestions = SuggestionAdvisor::suggest(&c, &SuggestionContext::default());

        let scores: Vec<(&str, u32)> = suggestions.iter().map(|s| (s.skill.as_str(), s.score)).collect();
        assert_eq!(
            scores,
            vec![
                ("Investigation", 85),
                ("Insight", 85),
                ("History", 65),
                ("Creative Approach", 65),
            ]
        );
        assert!(suggestions.iter().all(|s| s.suggested_character.is_none()));
        assert_eq!(suggestions[0].reasons[0], "Primary approach for this challenge");
    }

    #[test]
    fn test_synergy_and_usage_cap() {
        let mut c = challenge(standard_options());
        c.progression_mut()
            .record_attempt(ChallengeAttempt::new("a", "History", 17, 16, AttemptOutcome::Success));
        c.progression_mut()
            .record_attempt(ChallengeAttempt::new("a", "Investigation", 17, 15, AttemptOutcome::Success));

        let suggestions = SuggestionAdvisor::suggest(&c, &SuggestionContext::default());
        assert!(suggestions.iter().all(|s| s.skill != "History"));
        assert_eq!(suggestions[0].skill, "Insight");
        assert_eq!(suggestions[0].score, 95);
        assert_eq!(suggestions[1].skill, "Investigation");
        assert_eq!(suggestions[1].score, 70);
    }

    #[test]
    fn test_negative_momentum_favors_creative() {
        let mut c = challenge(standard_options());
        c.progression_mut().set_momentum(MomentumState {
            level: MomentumLevel::Negative,
            ..MomentumState::default()
        });

        let suggestions = SuggestionAdvisor::suggest(&c, &SuggestionContext::default());
        let creative = suggestions.iter().find(|s| s.skill == "Creative Approach").unwrap();
        assert_eq!(creative.score, 80);
        assert_eq!(suggestions[2].skill, "Creative Approach");
    }

    #[test]
    fn test_returns_at_most_five() {
        let options = (0..8)
            .map(|i| SkillOption::new(format!("Skill {}", i), SkillCategory::Primary, 15))
            .collect();
        let suggestions = SuggestionAdvisor::suggest(&challenge(options), &SuggestionContext::default());
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0].skill, "Skill 0");
        assert_eq!(suggestions[4].skill, "Skill 4");
    }

    #[test]
    fn test_prefers_characters_who_have_not_acted() {
        let mut c = challenge(standard_options());
        c.progression_mut()
            .record_attempt(ChallengeAttempt::new("aria", "Insight", 10, 16, AttemptOutcome::Failure));

        let context = SuggestionContext::with_characters(["aria", "bram"]);
        let suggestions = SuggestionAdvisor::suggest(&c, &context);
        assert_eq!(suggestions[0].suggested_character.as_deref(), Some("bram"));

        c.progression_mut()
            .record_attempt(ChallengeAttempt::new("bram", "Insight", 10, 16, AttemptOutcome::Failure));
        let suggestions = SuggestionAdvisor::suggest(&c, &context);
        assert_eq!(suggestions[0].suggested_character.as_deref(), Some("aria"));
    }
}
