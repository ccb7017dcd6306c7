//! Skill options - the approaches a party may take inside a challenge

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProgressionState;
use crate::domain::value_objects::MomentumLevel;

/// Literal skill name of the improvisation option every challenge carries
pub const CREATIVE_APPROACH: &str = "Creative Approach";

/// Discount applied by a synergy that declares no bonus of its own
pub const DEFAULT_SYNERGY_BONUS: i32 = 2;

/// One approach to the challenge. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillOption {
    pub skill: String,
    pub category: SkillCategory,
    /// DC before momentum, synergy and modifiers; clamped at resolution time
    pub base_dc: i32,
    pub success_outcome: String,
    pub failure_outcome: String,
    /// Maximum number of attempts with this skill, if capped
    pub usage_limit: Option<u32>,
    pub prerequisites: Vec<Prerequisite>,
    pub synergies: Vec<SkillSynergy>,
    pub alternatives: Vec<String>,
}

impl SkillOption {
    pub fn new(skill: impl Into<String>, category: SkillCategory, base_dc: i32) -> Self {
        Self {
            skill: skill.into(),
            category,
            base_dc,
            success_outcome: String::new(),
            failure_outcome: String::new(),
            usage_limit: None,
            prerequisites: Vec::new(),
            synergies: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    pub fn with_outcomes(mut self, success: impl Into<String>, failure: impl Into<String>) -> Self {
        self.success_outcome = success.into();
        self.failure_outcome = failure.into();
        self
    }

    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    pub fn with_prerequisite(mut self, prerequisite: Prerequisite) -> Self {
        self.prerequisites.push(prerequisite);
        self
    }

    pub fn with_synergy(mut self, synergy: SkillSynergy) -> Self {
        self.synergies.push(synergy);
        self
    }

    pub fn with_alternatives(mut self, alternatives: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.alternatives = alternatives.into_iter().map(Into::into).collect();
        self
    }

    /// Synergy declared with the given skill, if any
    pub fn synergy_with(&self, skill: &str) -> Option<&SkillSynergy> {
        self.synergies
            .iter()
            .find(|s| s.skill.eq_ignore_ascii_case(skill))
    }

    pub fn is_creative(&self) -> bool {
        self.category == SkillCategory::Creative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Primary,
    Secondary,
    Creative,
}

impl SkillCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Creative => "Creative",
        }
    }
}

/// DC discount earned when this option directly follows `skill`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSynergy {
    pub skill: String,
    #[serde(default = "default_synergy_bonus")]
    pub bonus: i32,
}

fn default_synergy_bonus() -> i32 {
    DEFAULT_SYNERGY_BONUS
}

impl SkillSynergy {
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            bonus: DEFAULT_SYNERGY_BONUS,
        }
    }

    pub fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }
}

/// Condition that must hold before an option may be attempted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Prerequisite {
    /// Some earlier attempt used this skill
    SkillUsed { skill: String },
    /// The party already banked this many successes
    MinimumSuccesses { count: u32 },
    /// Momentum is at least this level
    MomentumAtLeast { level: MomentumLevel },
}

impl Prerequisite {
    pub fn is_met(&self, state: &ProgressionState) -> bool {
        match self {
            Self::SkillUsed { skill } => state.has_used_skill(skill),
            Self::MinimumSuccesses { count } => state.current_successes() >= *count,
            Self::MomentumAtLeast { level } => state.momentum().level >= *level,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::SkillUsed { skill } => format!("{} must be attempted first", skill),
            Self::MinimumSuccesses { count } => format!("requires at least {} successes", count),
            Self::MomentumAtLeast { level } => {
                format!("requires {} momentum or better", level.display_name())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChallengeAttempt, MomentumState};
    use crate::domain::value_objects::AttemptOutcome;

    #[test]
    fn test_synergy_lookup_is_case_insensitive() {
        let option = SkillOption::new("Persuasion", SkillCategory::Primary, 15)
            .with_synergy(SkillSynergy::new("Insight"));

        assert_eq!(option.synergy_with("insight").map(|s| s.bonus), Some(2));
        assert!(option.synergy_with("Stealth").is_none());
    }

    #[test]
    fn test_synergy_bonus_defaults_when_missing_from_json() {
        let synergy: SkillSynergy = serde_json::from_str(r#"{"skill":"Arcana"}"#).unwrap();
        assert_eq!(synergy.bonus, DEFAULT_SYNERGY_BONUS);
    }

    #[test]
    fn test_prerequisites_against_state() {
        let mut state = ProgressionState::default();
        let needs_arcana = Prerequisite::SkillUsed { skill: "Arcana".to_string() };
        let needs_two = Prerequisite::MinimumSuccesses { count: 2 };
        let needs_positive = Prerequisite::MomentumAtLeast { level: MomentumLevel::Positive };

        assert!(!needs_arcana.is_met(&state));
        assert!(!needs_two.is_met(&state));
        assert!(!needs_positive.is_met(&state));

        state.record_attempt(ChallengeAttempt::new(
            "char-1",
            "Arcana",
            20,
            15,
            AttemptOutcome::CriticalSuccess,
        ));
        state.set_momentum(MomentumState {
            level: MomentumLevel::High,
            ..MomentumState::default()
        });

        assert!(needs_arcana.is_met(&state));
        assert!(needs_two.is_met(&state));
        assert!(needs_positive.is_met(&state));
    }
}
