//! Result tag of a single skill attempt

use serde::{Deserialize, Serialize};

/// How a single roll resolved against its final DC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptOutcome {
    CriticalSuccess,
    Success,
    Failure,
    CriticalFailure,
}

impl AttemptOutcome {
    /// Margin at which a roll becomes critical without a natural 20 or 1
    pub const CRITICAL_MARGIN: i32 = 10;

    /// Classify a roll. Natural 20 and natural 1 win over the margin checks.
    pub fn from_roll(roll: i32, final_dc: i32) -> Self {
        if roll == 20 {
            return Self::CriticalSuccess;
        }
        if roll == 1 {
            return Self::CriticalFailure;
        }
        if roll >= final_dc + Self::CRITICAL_MARGIN {
            Self::CriticalSuccess
        } else if roll >= final_dc {
            Self::Success
        } else if roll <= final_dc - Self::CRITICAL_MARGIN {
            Self::CriticalFailure
        } else {
            Self::Failure
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::Success)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::CriticalFailure)
    }

    /// How many marks this result puts on its counter
    pub fn weight(&self) -> u32 {
        if self.is_critical() {
            2
        } else {
            1
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CriticalSuccess => "Critical Success!",
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::CriticalFailure => "Critical Failure!",
        }
    }
}
