//! Value objects - Immutable objects defined by their attributes

mod attempt_outcome;
mod difficulty;
mod ids;
mod momentum;
mod party_context;
mod theme;

pub use attempt_outcome::AttemptOutcome;
pub use difficulty::{DifficultyTier, ParseDifficultyError};
pub use ids::*;
pub use momentum::MomentumLevel;
pub use party_context::{PartyContext, MAX_SOLUTIONS};
pub use theme::{ChallengeTheme, ParseThemeError};
