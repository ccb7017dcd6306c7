//! Built-in narrator - templated flavor text with no outside calls

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::outbound::NarrativePort;
use crate::domain::entities::ChallengeOutcome;
use crate::domain::value_objects::ChallengeTheme;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNarrator;

impl BuiltinNarrator {
    pub fn new() -> Self {
        Self
    }

    fn atmosphere(theme: ChallengeTheme) -> &'static str {
        match theme {
            ChallengeTheme::Infiltration => "Torchlight flickers along the walls and every footstep sounds too loud.",
            ChallengeTheme::Negotiation => "Cups are filled, smiles are thin, and every word is weighed.",
            ChallengeTheme::Exploration => "The path ahead fades into wild country no map has captured.",
            ChallengeTheme::Chase => "The quarry bolts and the streets blur past.",
            ChallengeTheme::Investigation => "Clues lie scattered, each one half a truth.",
            ChallengeTheme::MagicalRitual => "Runes glow on the floor as the air thickens with power.",
            ChallengeTheme::Survival => "The wilds close in, indifferent to anyone's plans.",
        }
    }
}

#[async_trait]
impl NarrativePort for BuiltinNarrator {
    async fn opening(&self, theme: ChallengeTheme, name: &str) -> Result<String> {
        Ok(format!("{} {}", name, Self::atmosphere(theme)).trim().to_string())
    }

    async fn conclusion(
        &self,
        theme: ChallengeTheme,
        outcome: ChallengeOutcome,
        successes: u32,
        failures: u32,
    ) -> Result<String> {
        let theme = theme.display_name().to_lowercase();
        let text = match outcome {
            ChallengeOutcome::Success if failures == 0 => {
                format!("Without a single misstep, the {} is won.", theme)
            }
            ChallengeOutcome::Success => format!(
                "After {} setbacks, the party carries the {}.",
                failures, theme
            ),
            ChallengeOutcome::Failure if successes == 0 => {
                format!("Nothing goes right, and the {} ends in ruin.", theme)
            }
            ChallengeOutcome::Failure => format!(
                "Despite {} hard-won gains, the {} slips away.",
                successes, theme
            ),
            ChallengeOutcome::Timeout => format!("Time runs out before the {} is settled.", theme),
            ChallengeOutcome::Ongoing => format!("The {} continues.", theme),
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_opening_includes_name() {
        let text = BuiltinNarrator::new()
            .opening(ChallengeTheme::Chase, "Rooftop Pursuit")
            .await
            .unwrap();
        assert!(text.starts_with("Rooftop Pursuit "));
    }

    #[tokio::test]
    async fn test_conclusion_tracks_outcome() {
        let narrator = BuiltinNarrator::new();
        let flawless = narrator
            .conclusion(ChallengeTheme::Negotiation, ChallengeOutcome::Success, 5, 0)
            .await
            .unwrap();
        assert_eq!(flawless, "Without a single misstep, the negotiation is won.");

        let narrow = narrator
            .conclusion(ChallengeTheme::MagicalRitual, ChallengeOutcome::Failure, 3, 2)
            .await
            .unwrap();
        assert!(narrow.contains("3 hard-won gains"));
        assert!(narrow.contains("magical ritual"));
    }
}
