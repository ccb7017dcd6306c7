//! Difficulty tiers for generated challenges

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Requested difficulty of a structured skill challenge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Easy,
    #[default]
    Moderate,
    Hard,
    Extreme,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [Self::Easy, Self::Moderate, Self::Hard, Self::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }

    /// Base DC every generated skill option starts from
    pub fn base_dc(&self) -> i32 {
        match self {
            Self::Easy => 12,
            Self::Moderate => 15,
            Self::Hard => 18,
            Self::Extreme => 21,
        }
    }

    /// Time budget used when the party context asks for a time limit
    pub fn time_limit_minutes(&self) -> u32 {
        match self {
            Self::Easy => 45,
            Self::Moderate => 30,
            Self::Hard => 20,
            Self::Extreme => 15,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown difficulty: {0} (expected easy, moderate, hard or extreme)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for DifficultyTier {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "moderate" | "medium" => Ok(Self::Moderate),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_limits_shrink_with_difficulty() {
        let limits: Vec<u32> = DifficultyTier::ALL
            .iter()
            .map(|d| d.time_limit_minutes())
            .collect();
        assert_eq!(limits, vec![45, 30, 20, 15]);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("HARD".parse(), Ok(DifficultyTier::Hard));
        assert_eq!("medium".parse(), Ok(DifficultyTier::Moderate));
        assert!("legendary".parse::<DifficultyTier>().is_err());
        assert_eq!(DifficultyTier::default(), DifficultyTier::Moderate);
    }
}
