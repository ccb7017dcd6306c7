//! Progression state machine - resolves skill attempts against a challenge
//!
//! States run `ongoing -> {success, failure, timeout}`. `process_attempt` is
//! the only operation that records attempts; `advance_time` is the host's
//! clock. Rejected attempts leave the state untouched.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    AttemptModifier, ChallengeAttempt, ChallengeOutcome, ChallengeStructure, MomentumState,
    ProgressionState, SkillOption, StructuredSkillChallenge,
};
use crate::domain::services::{CompletionEvaluator, DynamicElementCatalog};
use crate::domain::value_objects::{AttemptOutcome, MomentumLevel};

pub const MIN_DC: i32 = 5;
pub const MAX_DC: i32 = 25;

/// A pre-rolled attempt submitted by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAttemptInput {
    pub character_id: String,
    pub skill: String,
    pub roll: i32,
    #[serde(default)]
    pub modifiers: Vec<AttemptModifier>,
}

impl SkillAttemptInput {
    pub fn new(character_id: impl Into<String>, skill: impl Into<String>, roll: i32) -> Self {
        Self {
            character_id: character_id.into(),
            skill: skill.into(),
            roll,
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, source: impl Into<String>, value: i32) -> Self {
        self.modifiers.push(AttemptModifier::new(source, value));
        self
    }
}

/// Why an attempt was refused. Refusals are part of play, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptRejection {
    InvalidSkillChoice { skill: String },
    UsageLimitReached { skill: String, limit: u32 },
    PrerequisiteUnmet { skill: String, requirement: String },
    ChallengeComplete { outcome: ChallengeOutcome },
}

impl AttemptRejection {
    pub fn message(&self) -> String {
        match self {
            Self::InvalidSkillChoice { .. } => "Invalid skill choice".to_string(),
            Self::UsageLimitReached { skill, limit } => {
                format!("{} has already been used {} times", skill, limit)
            }
            Self::PrerequisiteUnmet { skill, requirement } => {
                format!("{} is not available yet: {}", skill, requirement)
            }
            Self::ChallengeComplete { .. } => "Challenge is already complete".to_string(),
        }
    }
}

/// How the final DC of an attempt was assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcBreakdown {
    pub base_dc: i32,
    pub momentum: i32,
    pub synergy: i32,
    pub modifiers: i32,
    pub final_dc: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredElement {
    pub name: String,
    pub effect: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub successes: u32,
    pub failures: u32,
    pub is_complete: bool,
}

impl ProgressSnapshot {
    fn of(challenge: &StructuredSkillChallenge) -> Self {
        let state = challenge.progression();
        Self {
            successes: state.current_successes(),
            failures: state.current_failures(),
            is_complete: CompletionEvaluator::outcome(&challenge.structure, state).is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillAttemptResult {
    pub success: bool,
    pub outcome: Option<AttemptOutcome>,
    pub message: String,
    pub narrative: String,
    pub rejection: Option<AttemptRejection>,
    pub dc: Option<DcBreakdown>,
    pub triggered_elements: Vec<TriggeredElement>,
    pub momentum: MomentumLevel,
    pub progress: ProgressSnapshot,
}

impl SkillAttemptResult {
    fn rejected(challenge: &StructuredSkillChallenge, rejection: AttemptRejection) -> Self {
        Self {
            success: false,
            outcome: None,
            message: rejection.message(),
            narrative: String::new(),
            rejection: Some(rejection),
            dc: None,
            triggered_elements: Vec::new(),
            momentum: challenge.progression().momentum().level,
            progress: ProgressSnapshot::of(challenge),
        }
    }
}

/// Assemble the final DC: base, momentum, synergy with the previous attempt,
/// then caller modifiers, clamped to [MIN_DC, MAX_DC].
pub fn compute_final_dc(
    option: &SkillOption,
    state: &ProgressionState,
    modifiers: &[AttemptModifier],
) -> DcBreakdown {
    let momentum = state.momentum().level.dc_adjustment();
    let synergy = state
        .last_attempt()
        .and_then(|previous| option.synergy_with(&previous.skill))
        .map_or(0, |synergy| -synergy.bonus);
    let modifier_total = modifiers
        .iter()
        .fold(0i32, |total, m| total.saturating_add(m.value));

    let raw = option
        .base_dc
        .saturating_add(momentum)
        .saturating_add(synergy)
        .saturating_add(modifier_total);

    DcBreakdown {
        base_dc: option.base_dc,
        momentum,
        synergy,
        modifiers: modifier_total,
        final_dc: raw.clamp(MIN_DC, MAX_DC),
    }
}

pub struct ProgressionStateMachine;

impl ProgressionStateMachine {
    pub fn process_attempt(
        challenge: &mut StructuredSkillChallenge,
        input: SkillAttemptInput,
    ) -> SkillAttemptResult {
        let status = CompletionEvaluator::outcome(&challenge.structure, challenge.progression());
        if status.is_terminal() {
            return SkillAttemptResult::rejected(
                challenge,
                AttemptRejection::ChallengeComplete { outcome: status },
            );
        }

        let Some(option) = challenge.skill_option(&input.skill) else {
            return SkillAttemptResult::rejected(
                challenge,
                AttemptRejection::InvalidSkillChoice { skill: input.skill },
            );
        };

        if let Some(rejection) = Self::validate(option, challenge.progression()) {
            return SkillAttemptResult::rejected(challenge, rejection);
        }

        let dc = compute_final_dc(option, challenge.progression(), &input.modifiers);
        let outcome = AttemptOutcome::from_roll(input.roll, dc.final_dc);
        let skill = option.skill.clone();
        let outcome_text = if outcome.is_success() {
            option.success_outcome.clone()
        } else {
            option.failure_outcome.clone()
        };

        let attempt = ChallengeAttempt::new(&input.character_id, &skill, input.roll, dc.final_dc, outcome)
            .with_modifiers(input.modifiers);
        challenge.progression_mut().record_attempt(attempt);

        let triggered: Vec<TriggeredElement> =
            DynamicElementCatalog::evaluate(&challenge.dynamic_elements, challenge.progression())
                .into_iter()
                .map(|element| TriggeredElement {
                    name: element.name.clone(),
                    effect: element.effect.description.clone(),
                })
                .collect();

        let level = challenge.progression().momentum().level.after(outcome);
        challenge.progression_mut().set_momentum(MomentumState {
            level,
            effects: triggered.iter().map(|t| t.effect.clone()).collect(),
            triggers: triggered.iter().map(|t| t.name.clone()).collect(),
        });

        let message = if outcome_text.is_empty() {
            format!(
                "{} tries {} (roll {} vs DC {}): {}",
                input.character_id, skill, input.roll, dc.final_dc, outcome.display_name()
            )
        } else {
            format!(
                "{} tries {} (roll {} vs DC {}): {} {}",
                input.character_id, skill, input.roll, dc.final_dc, outcome.display_name(), outcome_text
            )
        };

        SkillAttemptResult {
            success: outcome.is_success(),
            outcome: Some(outcome),
            message,
            narrative: progress_narrative(&challenge.structure, challenge.progression()),
            rejection: None,
            dc: Some(dc),
            triggered_elements: triggered,
            momentum: level,
            progress: ProgressSnapshot::of(challenge),
        }
    }

    /// Host-driven clock. Returns the snapshot after the time was added.
    pub fn advance_time(challenge: &mut StructuredSkillChallenge, minutes: u32) -> ProgressSnapshot {
        challenge.progression_mut().advance_time(minutes);
        ProgressSnapshot::of(challenge)
    }

    fn validate(option: &SkillOption, state: &ProgressionState) -> Option<AttemptRejection> {
        if let Some(limit) = option.usage_limit {
            if state.attempts_with(&option.skill) >= limit as usize {
                return Some(AttemptRejection::UsageLimitReached {
                    skill: option.skill.clone(),
                    limit,
                });
            }
        }

        option
            .prerequisites
            .iter()
            .find(|p| !p.is_met(state))
            .map(|p| AttemptRejection::PrerequisiteUnmet {
                skill: option.skill.clone(),
                requirement: p.describe(),
            })
    }
}

/// Narration keyed off how far each counter is toward its threshold
fn progress_narrative(structure: &ChallengeStructure, state: &ProgressionState) -> String {
    match CompletionEvaluator::outcome(structure, state) {
        ChallengeOutcome::Success => return "The final piece falls into place.".to_string(),
        ChallengeOutcome::Failure => return "The last chance slips away.".to_string(),
        ChallengeOutcome::Timeout => return "Time has run out.".to_string(),
        ChallengeOutcome::Ongoing => {}
    }

    let success_ratio = state.current_successes() as f64 / structure.successes_required as f64;
    let failure_ratio = state.current_failures() as f64 / structure.failures_allowed as f64;

    if success_ratio >= failure_ratio + 0.25 {
        "The group is gaining the upper hand.".to_string()
    } else if failure_ratio >= success_ratio + 0.25 {
        "The situation is slipping out of control.".to_string()
    } else {
        "The outcome hangs in the balance.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Prerequisite, SkillCategory, SkillSynergy};
    use crate::domain::services::{ChallengeTemplate, DynamicElementCatalog, MOMENTUM_BUILDS};
    use crate::domain::value_objects::{ChallengeTheme, DifficultyTier};

    fn challenge(structure: ChallengeStructure) -> StructuredSkillChallenge {
        let options = vec![
            SkillOption::new("Persuasion", SkillCategory::Primary, 15)
                .with_outcomes("They listen.", "They scoff.")
                .with_synergy(SkillSynergy::new("Insight")),
            SkillOption::new("Insight", SkillCategory::Primary, 15),
            SkillOption::new("History", SkillCategory::Secondary, 16).with_usage_limit(1),
            SkillOption::new("Intimidation", SkillCategory::Primary, 15)
                .with_prerequisite(Prerequisite::MinimumSuccesses { count: 1 }),
        ];
        let template = ChallengeTemplate::standard(ChallengeTheme::Negotiation);
        let elements = DynamicElementCatalog::generate(&template, &structure);
        StructuredSkillChallenge::new(
            ChallengeTheme::Negotiation,
            DifficultyTier::Moderate,
            structure,
            options,
        )
        .with_dynamic_elements(elements)
    }

    fn attempt(c: &mut StructuredSkillChallenge, skill: &str, roll: i32) -> SkillAttemptResult {
        ProgressionStateMachine::process_attempt(c, SkillAttemptInput::new("char-1", skill, roll))
    }

    fn set_momentum(c: &mut StructuredSkillChallenge, level: MomentumLevel) {
        c.progression_mut().set_momentum(MomentumState {
            level,
            ..MomentumState::default()
        });
    }

    #[test]
    fn test_high_momentum_lowers_dc_by_two() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        set_momentum(&mut c, MomentumLevel::High);
        let option = c.skill_option("Insight").unwrap();

        let dc = compute_final_dc(option, c.progression(), &[]);
        assert_eq!(dc.final_dc, 13);
        assert_eq!(dc.momentum, -2);
        assert_eq!(dc.synergy, 0);
    }

    #[test]
    fn test_final_dc_is_clamped() {
        let c = challenge(ChallengeStructure::new(5, 3));
        let option = c.skill_option("Insight").unwrap();

        let harsh = compute_final_dc(option, c.progression(), &[AttemptModifier::new("storm", 40)]);
        assert_eq!(harsh.final_dc, MAX_DC);

        let generous = compute_final_dc(option, c.progression(), &[AttemptModifier::new("aid", -40)]);
        assert_eq!(generous.final_dc, MIN_DC);
    }

    #[test]
    fn test_extreme_modifiers_saturate_before_clamping() {
        let c = challenge(ChallengeStructure::new(5, 3));
        let option = c.skill_option("Insight").unwrap();

        let storm = AttemptModifier::new("storm", i32::MAX);
        let harsh = compute_final_dc(option, c.progression(), &[storm.clone(), storm]);
        assert_eq!(harsh.modifiers, i32::MAX);
        assert_eq!(harsh.final_dc, MAX_DC);

        let blessing = AttemptModifier::new("blessing", i32::MIN);
        let generous = compute_final_dc(option, c.progression(), &[blessing.clone(), blessing]);
        assert_eq!(generous.modifiers, i32::MIN);
        assert_eq!(generous.final_dc, MIN_DC);
    }

    #[test]
    fn test_synergy_applies_only_after_partner_skill() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        attempt(&mut c, "Insight", 12);

        let option = c.skill_option("Persuasion").unwrap();
        let dc = compute_final_dc(option, c.progression(), &[]);
        // failure dropped momentum to negative (+1), synergy with Insight (-2)
        assert_eq!(dc.synergy, -2);
        assert_eq!(dc.final_dc, 14);
    }

    #[test]
    fn test_margin_critical_counts_double() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        let result = attempt(&mut c, "Insight", 25);

        assert!(result.success);
        assert_eq!(result.outcome, Some(AttemptOutcome::CriticalSuccess));
        assert_eq!(result.progress.successes, 2);
        assert_eq!(result.momentum, MomentumLevel::Positive);
    }

    #[test]
    fn test_natural_rolls() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        let result = ProgressionStateMachine::process_attempt(
            &mut c,
            SkillAttemptInput::new("char-1", "Insight", 20).with_modifier("curse", 10),
        );
        assert_eq!(result.outcome, Some(AttemptOutcome::CriticalSuccess));

        set_momentum(&mut c, MomentumLevel::High);
        let result = attempt(&mut c, "Insight", 1);
        assert_eq!(result.outcome, Some(AttemptOutcome::CriticalFailure));
        assert_eq!(result.progress.failures, 2);
        assert_eq!(result.momentum, MomentumLevel::Negative);
    }

    #[test]
    fn test_invalid_skill_is_rejected_without_mutation() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        let result = attempt(&mut c, "Arcana", 18);

        assert!(!result.success);
        assert_eq!(result.message, "Invalid skill choice");
        assert!(c.progression().attempt_history().is_empty());
        assert_eq!(c.progression().current_successes(), 0);
    }

    #[test]
    fn test_usage_limit_is_enforced() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        assert!(attempt(&mut c, "History", 18).rejection.is_none());

        let result = attempt(&mut c, "History", 18);
        assert_eq!(
            result.rejection,
            Some(AttemptRejection::UsageLimitReached { skill: "History".to_string(), limit: 1 })
        );
        assert_eq!(c.progression().attempt_history().len(), 1);
        assert_eq!(c.progression().current_successes(), 1);
    }

    #[test]
    fn test_prerequisite_is_enforced() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        let result = attempt(&mut c, "Intimidation", 18);
        assert!(matches!(result.rejection, Some(AttemptRejection::PrerequisiteUnmet { .. })));
        assert!(c.progression().attempt_history().is_empty());

        attempt(&mut c, "Insight", 18);
        let result = attempt(&mut c, "Intimidation", 18);
        assert!(result.rejection.is_none());
    }

    #[test]
    fn test_consecutive_successes_trigger_momentum_builds() {
        let mut c = challenge(ChallengeStructure::new(5, 3));

        let first = attempt(&mut c, "Insight", 16);
        assert!(first.triggered_elements.is_empty());

        let second = attempt(&mut c, "Insight", 16);
        assert_eq!(second.triggered_elements.len(), 1);
        assert_eq!(second.triggered_elements[0].name, MOMENTUM_BUILDS);
        assert_eq!(c.progression().momentum().triggers, vec![MOMENTUM_BUILDS.to_string()]);

        let option = c.skill_option("Insight").unwrap();
        assert_eq!(compute_final_dc(option, c.progression(), &[]).final_dc, 14);
    }

    #[test]
    fn test_attempts_after_completion_are_rejected() {
        let mut c = challenge(ChallengeStructure::new(2, 1));
        let result = attempt(&mut c, "Insight", 20);
        assert!(result.progress.is_complete);
        assert_eq!(result.narrative, "The final piece falls into place.");

        let result = attempt(&mut c, "Insight", 18);
        assert_eq!(
            result.rejection,
            Some(AttemptRejection::ChallengeComplete { outcome: ChallengeOutcome::Success })
        );
        assert_eq!(c.progression().attempt_history().len(), 1);
    }

    #[test]
    fn test_attempt_record_keeps_final_dc_and_modifiers() {
        let mut c = challenge(ChallengeStructure::new(5, 3));
        ProgressionStateMachine::process_attempt(
            &mut c,
            SkillAttemptInput::new("char-2", "persuasion", 17).with_modifier("rain", 2),
        );

        let record = c.progression().last_attempt().unwrap();
        assert_eq!(record.skill, "Persuasion");
        assert_eq!(record.character_id, "char-2");
        assert_eq!(record.final_dc, 17);
        assert_eq!(record.outcome, AttemptOutcome::Success);
        assert_eq!(record.modifiers.len(), 1);
    }

    #[test]
    fn test_advance_time_can_time_out() {
        let mut c = challenge(ChallengeStructure::new(5, 3).with_time_limit(30));
        assert!(!ProgressionStateMachine::advance_time(&mut c, 20).is_complete);
        assert!(ProgressionStateMachine::advance_time(&mut c, 10).is_complete);
    }

    #[test]
    fn test_progress_narrative_follows_ratio() {
        let mut losing = challenge(ChallengeStructure::new(5, 3));
        let result = attempt(&mut losing, "Insight", 10);
        assert_eq!(result.narrative, "The situation is slipping out of control.");

        let mut even = challenge(ChallengeStructure::new(4, 4));
        attempt(&mut even, "Insight", 10);
        let result = attempt(&mut even, "Insight", 18);
        assert_eq!(result.narrative, "The outcome hangs in the balance.");

        let mut winning = challenge(ChallengeStructure::new(5, 3));
        attempt(&mut winning, "Insight", 18);
        let result = attempt(&mut winning, "Insight", 18);
        assert_eq!(result.narrative, "The group is gaining the upper hand.");
    }
}
