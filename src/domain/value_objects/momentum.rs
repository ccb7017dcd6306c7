//! Momentum - the group's four-level mood during a challenge

use serde::{Deserialize, Serialize};

use super::AttemptOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumLevel {
    Negative,
    #[default]
    Neutral,
    Positive,
    High,
}

impl MomentumLevel {
    /// DC shift applied to the next attempt
    pub fn dc_adjustment(&self) -> i32 {
        match self {
            Self::Negative => 1,
            Self::Neutral => 0,
            Self::Positive => -1,
            Self::High => -2,
        }
    }

    /// Next level, driven by the latest result only
    pub fn after(self, outcome: AttemptOutcome) -> Self {
        match outcome {
            AttemptOutcome::CriticalSuccess => match self {
                Self::Positive | Self::High => Self::High,
                Self::Negative | Self::Neutral => Self::Positive,
            },
            AttemptOutcome::Success => match self {
                Self::Negative => Self::Neutral,
                Self::Neutral => Self::Positive,
                Self::Positive | Self::High => self,
            },
            AttemptOutcome::Failure => match self {
                Self::High | Self::Positive => Self::Neutral,
                Self::Neutral | Self::Negative => Self::Negative,
            },
            AttemptOutcome::CriticalFailure => Self::Negative,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
            Self::High => "High",
        }
    }
}
