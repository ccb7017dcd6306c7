//! Structure builder - turns a template into concrete challenge thresholds

use crate::domain::entities::{AppliedScaling, ChallengeStructure, ParticipationRules};
use crate::domain::services::{ChallengeTemplate, ScalingRules};
use crate::domain::value_objects::{DifficultyTier, PartyContext};

pub struct StructureBuilder<'a> {
    rules: &'a ScalingRules,
}

impl<'a> StructureBuilder<'a> {
    pub fn new(rules: &'a ScalingRules) -> Self {
        Self { rules }
    }

    pub fn build(
        &self,
        template: &ChallengeTemplate,
        difficulty: DifficultyTier,
        context: &PartyContext,
    ) -> (ChallengeStructure, AppliedScaling) {
        let (successes, failures, scaling) = self.rules.scale_structure(
            template.base_successes,
            template.base_failures,
            difficulty,
            context,
        );

        let participation = ParticipationRules {
            minimum_participants: context.party_size.clamp(1, 3),
            all_must_contribute: matches!(difficulty, DifficultyTier::Hard | DifficultyTier::Extreme),
            allow_assistance: true,
        };

        let mut structure =
            ChallengeStructure::new(successes, failures).with_participation(participation);
        if context.has_time_limit {
            structure = structure.with_time_limit(difficulty.time_limit_minutes());
        }

        (structure, scaling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ChallengeTheme;

    fn build(theme: ChallengeTheme, difficulty: DifficultyTier, context: PartyContext) -> ChallengeStructure {
        let rules = ScalingRules::standard();
        let template = ChallengeTemplate::standard(theme);
        StructureBuilder::new(&rules).build(&template, difficulty, &context).0
    }

    #[test]
    fn test_magical_ritual_moderate_keeps_template_base() {
        let structure = build(ChallengeTheme::MagicalRitual, DifficultyTier::Moderate, PartyContext::default());
        assert_eq!(structure.successes_required, 6);
        assert_eq!(structure.failures_allowed, 2);
        assert_eq!(structure.time_limit_minutes, None);
        assert_eq!(structure.format(), "6 successes before 2 failures");
    }

    #[test]
    fn test_magical_ritual_hard() {
        let structure = build(ChallengeTheme::MagicalRitual, DifficultyTier::Hard, PartyContext::default());
        assert_eq!(structure.successes_required, 7);
        assert_eq!(structure.failures_allowed, 1);
        assert!(structure.participation.all_must_contribute);
    }

    #[test]
    fn test_difficulty_table() {
        let easy = build(ChallengeTheme::Negotiation, DifficultyTier::Easy, PartyContext::default());
        assert_eq!((easy.successes_required, easy.failures_allowed), (4, 4));

        let extreme = build(ChallengeTheme::Negotiation, DifficultyTier::Extreme, PartyContext::default());
        assert_eq!((extreme.successes_required, extreme.failures_allowed), (7, 2));
    }

    #[test]
    fn test_time_limit_only_when_requested() {
        let context = PartyContext::default().with_time_limit();
        let structure = build(ChallengeTheme::Chase, DifficultyTier::Extreme, context);
        assert_eq!(structure.time_limit_minutes, Some(15));
    }

    #[test]
    fn test_bounds_hold_for_every_combination() {
        for theme in ChallengeTheme::ALL {
            for difficulty in DifficultyTier::ALL {
                for size in 1..=8 {
                    let structure = build(theme, difficulty, PartyContext::new(size, 5));
                    assert!(structure.successes_required >= 2);
                    assert!(structure.failures_allowed >= 1);
                }
            }
        }
    }
}
