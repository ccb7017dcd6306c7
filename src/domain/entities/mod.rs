//! Domain entities - Core business objects with identity

mod challenge;
mod consequence;
mod dynamic_element;
mod progression;
mod skill_option;

pub use challenge::{
    AppliedScaling, ChallengeOutcome, ChallengeStructure, ParticipationRules,
    StructuredSkillChallenge,
};
pub use consequence::{ChallengeConsequences, ConsequenceSet};
pub use dynamic_element::{
    DynamicEffect, DynamicElement, DynamicTrigger, EffectDuration, EffectKind, TriggerKind,
    DEFAULT_STREAK,
};
pub use progression::{AttemptModifier, ChallengeAttempt, MomentumState, ProgressionState};
pub use skill_option::{
    Prerequisite, SkillCategory, SkillOption, SkillSynergy, CREATIVE_APPROACH,
    DEFAULT_SYNERGY_BONUS,
};
