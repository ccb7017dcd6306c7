//! Completion evaluator - decides whether a challenge has concluded
//!
//! Thresholds are compared with `>=` because a critical result can carry a
//! counter past its threshold in a single step. When several conditions hold
//! at once, success wins over failure and failure wins over timeout.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    ChallengeOutcome, ChallengeStructure, ConsequenceSet, ProgressionState, StructuredSkillChallenge,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReport {
    pub is_complete: bool,
    pub outcome: ChallengeOutcome,
    pub successes: u32,
    pub failures: u32,
    pub consequences: Option<ConsequenceSet>,
    pub narrative_conclusion: Option<String>,
}

pub struct CompletionEvaluator;

impl CompletionEvaluator {
    pub fn outcome(structure: &ChallengeStructure, state: &ProgressionState) -> ChallengeOutcome {
        if state.current_successes() >= structure.successes_required {
            ChallengeOutcome::Success
        } else if state.current_failures() >= structure.failures_allowed {
            ChallengeOutcome::Failure
        } else if structure
            .time_limit_minutes
            .is_some_and(|limit| state.time_elapsed_minutes() >= limit)
        {
            ChallengeOutcome::Timeout
        } else {
            ChallengeOutcome::Ongoing
        }
    }

    pub fn evaluate(challenge: &StructuredSkillChallenge) -> CompletionReport {
        let state = challenge.progression();
        let outcome = Self::outcome(&challenge.structure, state);

        let (consequences, narrative_conclusion) = if outcome.is_terminal() {
            (
                Some(Self::select_consequences(challenge, outcome).clone()),
                Some(Self::conclusion(challenge, outcome)),
            )
        } else {
            (None, None)
        };

        CompletionReport {
            is_complete: outcome.is_terminal(),
            outcome,
            successes: state.current_successes(),
            failures: state.current_failures(),
            consequences,
            narrative_conclusion,
        }
    }

    /// Pick the consequence tier that matches how the challenge ended
    pub fn select_consequences(
        challenge: &StructuredSkillChallenge,
        outcome: ChallengeOutcome,
    ) -> &ConsequenceSet {
        let state = challenge.progression();
        let consequences = &challenge.consequences;
        let halfway = state.current_successes() * 2 >= challenge.structure.successes_required;

        match outcome {
            ChallengeOutcome::Success if state.current_failures() == 0 => &consequences.critical_success,
            ChallengeOutcome::Success => &consequences.success,
            ChallengeOutcome::Failure if state.current_successes() == 0 => &consequences.critical_failure,
            ChallengeOutcome::Failure | ChallengeOutcome::Timeout if halfway => &consequences.partial,
            ChallengeOutcome::Failure | ChallengeOutcome::Timeout | ChallengeOutcome::Ongoing => {
                &consequences.failure
            }
        }
    }

    fn conclusion(challenge: &StructuredSkillChallenge, outcome: ChallengeOutcome) -> String {
        let state = challenge.progression();
        let tally = format!(
            "{} of {} successes, {} of {} failures",
            state.current_successes(),
            challenge.structure.successes_required,
            state.current_failures(),
            challenge.structure.failures_allowed
        );

        match outcome {
            ChallengeOutcome::Success => format!(
                "{} ends in triumph after {} attempts ({}).",
                challenge.name,
                state.attempt_history().len(),
                tally
            ),
            ChallengeOutcome::Failure => format!(
                "{} ends in defeat after {} attempts ({}).",
                challenge.name,
                state.attempt_history().len(),
                tally
            ),
            ChallengeOutcome::Timeout => format!(
                "Time runs out on {} after {} minutes ({}).",
                challenge.name,
                state.time_elapsed_minutes(),
                tally
            ),
            ChallengeOutcome::Ongoing => format!("{} continues ({}).", challenge.name, tally),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChallengeAttempt, SkillCategory, SkillOption};
    use crate::domain::services::ConsequenceGenerator;
    use crate::domain::value_objects::{AttemptOutcome, ChallengeTheme, DifficultyTier};

    fn challenge(structure: ChallengeStructure) -> StructuredSkillChallenge {
        StructuredSkillChallenge::new(
            ChallengeTheme::Negotiation,
            DifficultyTier::Moderate,
            structure,
            vec![SkillOption::new("Persuasion", SkillCategory::Primary, 15)],
        )
        .with_name("The Parley")
        .with_consequences(ConsequenceGenerator::generate(
            ChallengeTheme::Negotiation,
            DifficultyTier::Moderate,
        ))
    }

    fn record(challenge: &mut StructuredSkillChallenge, outcome: AttemptOutcome) {
        challenge
            .progression_mut()
            .record_attempt(ChallengeAttempt::new("char-1", "Persuasion", 10, 15, outcome));
    }

    #[test]
    fn test_ongoing_has_no_consequences() {
        let c = challenge(ChallengeStructure::new(3, 2));
        let report = CompletionEvaluator::evaluate(&c);
        assert!(!report.is_complete);
        assert_eq!(report.outcome, ChallengeOutcome::Ongoing);
        assert!(report.consequences.is_none());
        assert!(report.narrative_conclusion.is_none());
    }

    #[test]
    fn test_success_wins_when_both_thresholds_are_met() {
        let mut c = challenge(ChallengeStructure::new(2, 1));
        record(&mut c, AttemptOutcome::CriticalFailure);
        record(&mut c, AttemptOutcome::CriticalSuccess);

        let report = CompletionEvaluator::evaluate(&c);
        assert!(report.is_complete);
        assert_eq!(report.outcome, ChallengeOutcome::Success);
        assert_eq!(report.consequences, Some(c.consequences.success.clone()));
    }

    #[test]
    fn test_overshoot_still_completes() {
        let mut c = challenge(ChallengeStructure::new(3, 2));
        record(&mut c, AttemptOutcome::Success);
        record(&mut c, AttemptOutcome::Success);
        record(&mut c, AttemptOutcome::CriticalSuccess);

        let report = CompletionEvaluator::evaluate(&c);
        assert_eq!(report.successes, 4);
        assert_eq!(report.outcome, ChallengeOutcome::Success);
        assert_eq!(report.consequences, Some(c.consequences.critical_success.clone()));
    }

    #[test]
    fn test_failure_tiers() {
        let mut flawless_loss = challenge(ChallengeStructure::new(4, 2));
        record(&mut flawless_loss, AttemptOutcome::CriticalFailure);
        assert_eq!(
            CompletionEvaluator::evaluate(&flawless_loss).consequences,
            Some(flawless_loss.consequences.critical_failure.clone())
        );

        let mut close_loss = challenge(ChallengeStructure::new(4, 2));
        record(&mut close_loss, AttemptOutcome::Success);
        record(&mut close_loss, AttemptOutcome::Success);
        record(&mut close_loss, AttemptOutcome::Failure);
        record(&mut close_loss, AttemptOutcome::Failure);
        assert_eq!(
            CompletionEvaluator::evaluate(&close_loss).consequences,
            Some(close_loss.consequences.partial.clone())
        );

        let mut plain_loss = challenge(ChallengeStructure::new(4, 2));
        record(&mut plain_loss, AttemptOutcome::Success);
        record(&mut plain_loss, AttemptOutcome::CriticalFailure);
        assert_eq!(
            CompletionEvaluator::evaluate(&plain_loss).consequences,
            Some(plain_loss.consequences.failure.clone())
        );
    }

    #[test]
    fn test_timeout_is_checked_last() {
        let mut c = challenge(ChallengeStructure::new(3, 2).with_time_limit(20));
        c.progression_mut().advance_time(25);
        assert_eq!(CompletionEvaluator::evaluate(&c).outcome, ChallengeOutcome::Timeout);

        record(&mut c, AttemptOutcome::CriticalFailure);
        assert_eq!(CompletionEvaluator::evaluate(&c).outcome, ChallengeOutcome::Failure);
    }

    #[test]
    fn test_conclusion_mentions_tally() {
        let mut c = challenge(ChallengeStructure::new(2, 2));
        record(&mut c, AttemptOutcome::CriticalSuccess);
        let conclusion = CompletionEvaluator::evaluate(&c).narrative_conclusion.unwrap();
        assert!(conclusion.starts_with("The Parley ends in triumph"));
        assert!(conclusion.contains("2 of 2 successes"));
    }
}
