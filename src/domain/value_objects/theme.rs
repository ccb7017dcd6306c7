//! Challenge themes - the keys of the template catalog

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of scene a structured skill challenge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeTheme {
    Infiltration,
    Negotiation,
    Exploration,
    Chase,
    Investigation,
    MagicalRitual,
    Survival,
}

impl ChallengeTheme {
    pub const ALL: [ChallengeTheme; 7] = [
        Self::Infiltration,
        Self::Negotiation,
        Self::Exploration,
        Self::Chase,
        Self::Investigation,
        Self::MagicalRitual,
        Self::Survival,
    ];

    /// Catalog key, as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infiltration => "infiltration",
            Self::Negotiation => "negotiation",
            Self::Exploration => "exploration",
            Self::Chase => "chase",
            Self::Investigation => "investigation",
            Self::MagicalRitual => "magical-ritual",
            Self::Survival => "survival",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Infiltration => "Infiltration",
            Self::Negotiation => "Negotiation",
            Self::Exploration => "Exploration",
            Self::Chase => "Chase",
            Self::Investigation => "Investigation",
            Self::MagicalRitual => "Magical Ritual",
            Self::Survival => "Survival",
        }
    }
}

impl fmt::Display for ChallengeTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown challenge theme: {0}")]
pub struct ParseThemeError(pub String);

impl FromStr for ChallengeTheme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == normalized)
            .ok_or_else(|| ParseThemeError(s.to_string()))
    }
}
