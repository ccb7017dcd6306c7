//! Structured skill challenge entity - "X successes before Y failures"
//!
//! A challenge is generated once per play session and owned by whoever asked
//! for it. Everything except the progression state is fixed at generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    ChallengeConsequences, DynamicElement, ProgressionState, SkillOption,
};
use crate::domain::value_objects::{ChallengeId, ChallengeTheme, DifficultyTier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredSkillChallenge {
    pub id: ChallengeId,
    pub name: String,
    pub description: String,
    pub theme: ChallengeTheme,
    pub difficulty: DifficultyTier,
    pub structure: ChallengeStructure,
    pub skill_options: Vec<SkillOption>,
    pub consequences: ChallengeConsequences,
    pub dynamic_elements: Vec<DynamicElement>,
    pub scaling: AppliedScaling,
    pub created_at: DateTime<Utc>,
    progression: ProgressionState,
}

impl StructuredSkillChallenge {
    pub fn new(
        theme: ChallengeTheme,
        difficulty: DifficultyTier,
        structure: ChallengeStructure,
        skill_options: Vec<SkillOption>,
    ) -> Self {
        Self {
            id: ChallengeId::new(),
            name: String::new(),
            description: String::new(),
            theme,
            difficulty,
            structure,
            skill_options,
            consequences: ChallengeConsequences::default(),
            dynamic_elements: Vec::new(),
            scaling: AppliedScaling::default(),
            created_at: Utc::now(),
            progression: ProgressionState::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_consequences(mut self, consequences: ChallengeConsequences) -> Self {
        self.consequences = consequences;
        self
    }

    pub fn with_dynamic_elements(mut self, elements: Vec<DynamicElement>) -> Self {
        self.dynamic_elements = elements;
        self
    }

    pub fn with_scaling(mut self, scaling: AppliedScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub(in crate::domain) fn progression_mut(&mut self) -> &mut ProgressionState {
        &mut self.progression
    }

    /// Look up an option by skill name, ignoring case
    pub fn skill_option(&self, skill: &str) -> Option<&SkillOption> {
        self.skill_options
            .iter()
            .find(|o| o.skill.eq_ignore_ascii_case(skill.trim()))
    }
}

/// Thresholds and rules fixed at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStructure {
    pub successes_required: u32,
    pub failures_allowed: u32,
    pub time_limit_minutes: Option<u32>,
    pub participation: ParticipationRules,
}

impl ChallengeStructure {
    pub const MIN_SUCCESSES: u32 = 2;
    pub const MIN_FAILURES: u32 = 1;

    /// Build a structure, lifting both bounds to their minimums
    pub fn new(successes_required: u32, failures_allowed: u32) -> Self {
        Self {
            successes_required: successes_required.max(Self::MIN_SUCCESSES),
            failures_allowed: failures_allowed.max(Self::MIN_FAILURES),
            time_limit_minutes: None,
            participation: ParticipationRules::default(),
        }
    }

    pub fn with_time_limit(mut self, minutes: u32) -> Self {
        self.time_limit_minutes = Some(minutes);
        self
    }

    pub fn with_participation(mut self, participation: ParticipationRules) -> Self {
        self.participation = participation;
        self
    }

    pub fn format(&self) -> String {
        format!(
            "{} successes before {} failures",
            self.successes_required, self.failures_allowed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRules {
    pub minimum_participants: u32,
    /// Every character should attempt at least one roll
    pub all_must_contribute: bool,
    /// Characters may aid another character's roll
    pub allow_assistance: bool,
}

impl Default for ParticipationRules {
    fn default() -> Self {
        Self {
            minimum_participants: 1,
            all_must_contribute: false,
            allow_assistance: true,
        }
    }
}

/// The adjustments the scaling rules applied to this challenge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedScaling {
    pub difficulty_successes: i32,
    pub difficulty_failures: i32,
    pub party_successes: i32,
    pub party_failures: i32,
    pub party_dc: i32,
    pub level_dc: i32,
}

impl AppliedScaling {
    /// Total DC shift applied to every generated option
    pub fn dc_adjustment(&self) -> i32 {
        self.party_dc + self.level_dc
    }
}

/// Where a challenge stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeOutcome {
    Ongoing,
    Success,
    Failure,
    Timeout,
}

impl ChallengeOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Timeout => "Out of Time",
        }
    }
}
