//! Consequence generator - the five outcome tiers handed out at completion

use crate::domain::entities::{ChallengeConsequences, ConsequenceSet};
use crate::domain::value_objects::{ChallengeTheme, DifficultyTier};

/// What winning and losing mean for each theme
fn stakes(theme: ChallengeTheme) -> (&'static str, &'static str) {
    match theme {
        ChallengeTheme::Infiltration => ("reach the objective unseen", "the alarm is raised"),
        ChallengeTheme::Negotiation => ("secure favorable terms", "the talks collapse"),
        ChallengeTheme::Exploration => ("chart a safe route", "the party becomes lost"),
        ChallengeTheme::Chase => ("catch the quarry", "the quarry escapes"),
        ChallengeTheme::Investigation => ("uncover the truth", "the trail goes cold"),
        ChallengeTheme::MagicalRitual => ("complete the ritual", "the ritual backfires"),
        ChallengeTheme::Survival => ("endure the ordeal", "the wilds take their toll"),
    }
}

pub struct ConsequenceGenerator;

impl ConsequenceGenerator {
    pub fn generate(theme: ChallengeTheme, difficulty: DifficultyTier) -> ChallengeConsequences {
        let (win, loss) = stakes(theme);
        let reward_tier = match difficulty {
            DifficultyTier::Easy => "minor",
            DifficultyTier::Moderate => "moderate",
            DifficultyTier::Hard => "major",
            DifficultyTier::Extreme => "legendary",
        };

        ChallengeConsequences {
            success: ConsequenceSet::new(format!("The party works together to {}.", win))
                .with_effect(format!("Award a {} reward", reward_tier)),
            failure: ConsequenceSet::new(format!("Despite their efforts, {}.", loss))
                .with_effect("The party suffers a setback")
                .with_effect("Introduce a new complication"),
            partial: ConsequenceSet::new(format!(
                "The party manages to {}, but not without cost.",
                win
            ))
            .with_effect("Grant the goal with a lasting drawback")
            .with_effect(format!("Award a reduced {} reward", reward_tier)),
            critical_success: ConsequenceSet::new(format!(
                "Flawlessly, the party manages to {} and gains an unexpected edge.",
                win
            ))
            .with_effect(format!("Award a {} reward", reward_tier))
            .with_effect("Grant an additional boon or ally"),
            critical_failure: ConsequenceSet::new(format!(
                "Disaster strikes: {} and matters grow far worse.",
                loss
            ))
            .with_effect("The party suffers a severe setback")
            .with_effect("A lasting enemy or hazard emerges"),
        }
    }
}
