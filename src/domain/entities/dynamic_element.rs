//! Dynamic elements - trigger/effect rules evaluated after every attempt

use serde::{Deserialize, Serialize};

use crate::domain::entities::ProgressionState;

/// Consecutive successes a success-count trigger waits for when it has no threshold
pub const DEFAULT_STREAK: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicElement {
    pub name: String,
    pub trigger: DynamicTrigger,
    pub effect: DynamicEffect,
    pub duration: EffectDuration,
}

impl DynamicElement {
    pub fn new(name: impl Into<String>, trigger: DynamicTrigger, effect: DynamicEffect) -> Self {
        Self {
            name: name.into(),
            trigger,
            effect,
            duration: EffectDuration::NextAttempt,
        }
    }

    pub fn with_duration(mut self, duration: EffectDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Read-only check against the state after an attempt was recorded.
    ///
    /// Only success streaks and accumulated failures are evaluated here; time,
    /// character-action and environmental triggers are announced by the host.
    pub fn is_triggered(&self, state: &ProgressionState) -> bool {
        match self.trigger.trigger_type {
            TriggerKind::SuccessCount => {
                let streak = self.trigger.threshold.unwrap_or(DEFAULT_STREAK) as usize;
                state.trailing_successes(streak)
            }
            TriggerKind::FailureCount => match self.trigger.threshold {
                Some(threshold) => state.current_failures() >= threshold,
                None => false,
            },
            TriggerKind::Time | TriggerKind::CharacterAction | TriggerKind::Environmental => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicTrigger {
    pub trigger_type: TriggerKind,
    /// Human-readable condition for the GM
    pub condition: String,
    pub threshold: Option<u32>,
}

impl DynamicTrigger {
    pub fn consecutive_successes(count: u32) -> Self {
        Self {
            trigger_type: TriggerKind::SuccessCount,
            condition: format!("{} consecutive successes", count),
            threshold: Some(count),
        }
    }

    pub fn accumulated_failures(count: u32) -> Self {
        Self {
            trigger_type: TriggerKind::FailureCount,
            condition: format!("{} accumulated failures", count),
            threshold: Some(count),
        }
    }

    pub fn environmental(condition: impl Into<String>) -> Self {
        Self {
            trigger_type: TriggerKind::Environmental,
            condition: condition.into(),
            threshold: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    SuccessCount,
    FailureCount,
    Time,
    CharacterAction,
    Environmental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicEffect {
    pub effect_type: EffectKind,
    /// Mechanical description announced when the element fires
    pub description: String,
}

impl DynamicEffect {
    pub fn new(effect_type: EffectKind, description: impl Into<String>) -> Self {
        Self {
            effect_type,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    DifficultyShift,
    Narrative,
    Complication,
    Opportunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EffectDuration {
    NextAttempt,
    Attempts(u32),
    RestOfChallenge,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ChallengeAttempt;
    use crate::domain::value_objects::AttemptOutcome;

    fn record(state: &mut ProgressionState, outcome: AttemptOutcome) {
        state.record_attempt(ChallengeAttempt::new("char-1", "Stealth", 12, 15, outcome));
    }

    #[test]
    fn test_streak_trigger_needs_consecutive_successes() {
        let element = DynamicElement::new(
            "Momentum Builds",
            DynamicTrigger::consecutive_successes(2),
            DynamicEffect::new(EffectKind::DifficultyShift, "Next DC -1"),
        );
        let mut state = ProgressionState::default();

        record(&mut state, AttemptOutcome::Success);
        assert!(!element.is_triggered(&state));
        record(&mut state, AttemptOutcome::Failure);
        record(&mut state, AttemptOutcome::Success);
        assert!(!element.is_triggered(&state));
        record(&mut state, AttemptOutcome::CriticalSuccess);
        assert!(element.is_triggered(&state));
    }

    #[test]
    fn test_failure_trigger_uses_accumulated_count() {
        let element = DynamicElement::new(
            "Complications Mount",
            DynamicTrigger::accumulated_failures(2),
            DynamicEffect::new(EffectKind::Complication, "Guards grow suspicious"),
        );
        let mut state = ProgressionState::default();

        record(&mut state, AttemptOutcome::Failure);
        assert!(!element.is_triggered(&state));
        record(&mut state, AttemptOutcome::Success);
        record(&mut state, AttemptOutcome::Failure);
        assert!(element.is_triggered(&state));
    }

    #[test]
    fn test_environmental_trigger_is_never_evaluated() {
        let element = DynamicElement::new(
            "Rising Tide",
            DynamicTrigger::environmental("The tide comes in"),
            DynamicEffect::new(EffectKind::Narrative, "Water floods the lower halls"),
        );
        let mut state = ProgressionState::default();
        record(&mut state, AttemptOutcome::CriticalFailure);
        assert!(!element.is_triggered(&state));
    }
}
