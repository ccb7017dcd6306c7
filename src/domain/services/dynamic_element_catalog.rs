//! Dynamic element catalog - mid-challenge triggers for a generated challenge

use crate::domain::entities::{
    ChallengeStructure, DynamicEffect, DynamicElement, DynamicTrigger, EffectDuration, EffectKind,
    ProgressionState, DEFAULT_STREAK,
};
use crate::domain::services::ChallengeTemplate;

pub const MOMENTUM_BUILDS: &str = "Momentum Builds";
pub const COMPLICATIONS_MOUNT: &str = "Complications Mount";

pub struct DynamicElementCatalog;

impl DynamicElementCatalog {
    pub fn generate(template: &ChallengeTemplate, structure: &ChallengeStructure) -> Vec<DynamicElement> {
        let failure_threshold = structure.failures_allowed.saturating_sub(1).max(1);

        vec![
            DynamicElement::new(
                MOMENTUM_BUILDS,
                DynamicTrigger::consecutive_successes(DEFAULT_STREAK),
                DynamicEffect::new(
                    EffectKind::DifficultyShift,
                    "The group finds its rhythm: the next attempt is easier",
                ),
            ),
            DynamicElement::new(
                COMPLICATIONS_MOUNT,
                DynamicTrigger::accumulated_failures(failure_threshold),
                DynamicEffect::new(
                    EffectKind::Complication,
                    "Setbacks pile up and the situation grows more dangerous",
                ),
            )
            .with_duration(EffectDuration::RestOfChallenge),
            DynamicElement::new(
                template.twist.name.clone(),
                DynamicTrigger::environmental(template.twist.condition.clone()),
                DynamicEffect::new(EffectKind::Narrative, template.twist.effect.clone()),
            )
            .with_duration(EffectDuration::Attempts(2)),
        ]
    }

    /// Elements whose trigger holds for the given state, in declaration order
    pub fn evaluate<'e>(elements: &'e [DynamicElement], state: &ProgressionState) -> Vec<&'e DynamicElement> {
        elements.iter().filter(|e| e.is_triggered(state)).collect()
    }
}
