//! Progression state - counters, audit log and momentum of a running challenge
//!
//! Only the progression state machine writes to this state; everything else
//! reads it through the accessors below.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AttemptId, AttemptOutcome, MomentumLevel};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionState {
    current_successes: u32,
    current_failures: u32,
    attempt_history: Vec<ChallengeAttempt>,
    used_skills: BTreeSet<String>,
    participating_characters: BTreeSet<String>,
    time_elapsed_minutes: u32,
    momentum: MomentumState,
}

impl ProgressionState {
    pub fn current_successes(&self) -> u32 {
        self.current_successes
    }

    pub fn current_failures(&self) -> u32 {
        self.current_failures
    }

    pub fn attempt_history(&self) -> &[ChallengeAttempt] {
        &self.attempt_history
    }

    pub fn used_skills(&self) -> &BTreeSet<String> {
        &self.used_skills
    }

    pub fn participating_characters(&self) -> &BTreeSet<String> {
        &self.participating_characters
    }

    pub fn time_elapsed_minutes(&self) -> u32 {
        self.time_elapsed_minutes
    }

    pub fn momentum(&self) -> &MomentumState {
        &self.momentum
    }

    pub fn last_attempt(&self) -> Option<&ChallengeAttempt> {
        self.attempt_history.last()
    }

    /// Number of logged attempts that used `skill`
    pub fn attempts_with(&self, skill: &str) -> usize {
        self.attempt_history
            .iter()
            .filter(|a| a.skill.eq_ignore_ascii_case(skill))
            .count()
    }

    pub fn has_used_skill(&self, skill: &str) -> bool {
        self.used_skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn has_participated(&self, character_id: &str) -> bool {
        self.participating_characters.contains(character_id)
    }

    /// Whether the last `count` attempts all landed as successes
    pub fn trailing_successes(&self, count: usize) -> bool {
        count > 0
            && self.attempt_history.len() >= count
            && self.attempt_history[self.attempt_history.len() - count..]
                .iter()
                .all(|a| a.outcome.is_success())
    }

    /// Append an attempt and bank its weight on the matching counter.
    /// Counters are not clamped: a critical can overshoot the threshold.
    pub(crate) fn record_attempt(&mut self, attempt: ChallengeAttempt) {
        if attempt.outcome.is_success() {
            self.current_successes += attempt.outcome.weight();
        } else {
            self.current_failures += attempt.outcome.weight();
        }
        self.used_skills.insert(attempt.skill.clone());
        self.participating_characters.insert(attempt.character_id.clone());
        self.attempt_history.push(attempt);
    }

    pub(crate) fn set_momentum(&mut self, momentum: MomentumState) {
        self.momentum = momentum;
    }

    pub(crate) fn advance_time(&mut self, minutes: u32) {
        self.time_elapsed_minutes = self.time_elapsed_minutes.saturating_add(minutes);
    }
}

/// One resolved roll. Appended to the history and never changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeAttempt {
    pub id: AttemptId,
    pub character_id: String,
    pub skill: String,
    pub roll: i32,
    pub final_dc: i32,
    pub outcome: AttemptOutcome,
    pub timestamp: DateTime<Utc>,
    pub modifiers: Vec<AttemptModifier>,
}

impl ChallengeAttempt {
    pub fn new(
        character_id: impl Into<String>,
        skill: impl Into<String>,
        roll: i32,
        final_dc: i32,
        outcome: AttemptOutcome,
    ) -> Self {
        Self {
            id: AttemptId::new(),
            character_id: character_id.into(),
            skill: skill.into(),
            roll,
            final_dc,
            outcome,
            timestamp: Utc::now(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<AttemptModifier>) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A caller-supplied DC modifier (positive makes the attempt harder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptModifier {
    pub source: String,
    pub value: i32,
}

impl AttemptModifier {
    pub fn new(source: impl Into<String>, value: i32) -> Self {
        Self {
            source: source.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MomentumState {
    pub level: MomentumLevel,
    /// Effect descriptions announced by the latest attempt
    pub effects: Vec<String>,
    /// Names of the dynamic elements the latest attempt triggered
    pub triggers: Vec<String>,
}
