//! Scaling rules - pure lookup tables for difficulty, party size and level
//!
//! Applied once while a challenge is generated, never during resolution.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AppliedScaling, ChallengeStructure};
use crate::domain::value_objects::{DifficultyTier, PartyContext};

/// Shift applied to a template's success/failure counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureAdjustment {
    pub successes: i32,
    pub failures: i32,
}

impl StructureAdjustment {
    pub const fn new(successes: i32, failures: i32) -> Self {
        Self { successes, failures }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAdjustment {
    pub structure: StructureAdjustment,
    pub dc: i32,
}

/// Inclusive level range and the DC shift it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBand {
    pub min_level: u32,
    pub max_level: Option<u32>,
    pub dc: i32,
}

impl LevelBand {
    fn contains(&self, level: u32) -> bool {
        level >= self.min_level && self.max_level.map_or(true, |max| level <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingRules {
    /// Parties of three or fewer
    pub small_party: PartyAdjustment,
    /// Parties of exactly five
    pub large_party: PartyAdjustment,
    /// Parties of six or more
    pub huge_party: PartyAdjustment,
    pub level_bands: Vec<LevelBand>,
}

impl Default for ScalingRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScalingRules {
    pub fn standard() -> Self {
        Self {
            small_party: PartyAdjustment {
                structure: StructureAdjustment::new(-1, 0),
                dc: -1,
            },
            large_party: PartyAdjustment {
                structure: StructureAdjustment::new(1, 1),
                dc: 0,
            },
            huge_party: PartyAdjustment {
                structure: StructureAdjustment::new(2, 1),
                dc: 0,
            },
            // Level 5 sits between bands and stays neutral
            level_bands: vec![
                LevelBand { min_level: 1, max_level: Some(2), dc: -3 },
                LevelBand { min_level: 3, max_level: Some(4), dc: -1 },
                LevelBand { min_level: 6, max_level: Some(8), dc: 1 },
                LevelBand { min_level: 9, max_level: None, dc: 2 },
            ],
        }
    }

    pub fn difficulty_adjustment(&self, difficulty: DifficultyTier) -> StructureAdjustment {
        match difficulty {
            DifficultyTier::Easy => StructureAdjustment::new(-1, 1),
            DifficultyTier::Moderate => StructureAdjustment::new(0, 0),
            DifficultyTier::Hard => StructureAdjustment::new(1, -1),
            DifficultyTier::Extreme => StructureAdjustment::new(2, -1),
        }
    }

    pub fn party_adjustment(&self, party_size: u32) -> PartyAdjustment {
        match party_size {
            0..=3 => self.small_party,
            4 => PartyAdjustment::default(),
            5 => self.large_party,
            _ => self.huge_party,
        }
    }

    pub fn level_dc_adjustment(&self, party_level: u32) -> i32 {
        self.level_bands
            .iter()
            .find(|band| band.contains(party_level))
            .map_or(0, |band| band.dc)
    }

    /// Scale a template's base counts for the requested difficulty and party.
    ///
    /// Returns the clamped counts and a record of every adjustment used.
    pub fn scale_structure(
        &self,
        base_successes: u32,
        base_failures: u32,
        difficulty: DifficultyTier,
        context: &PartyContext,
    ) -> (u32, u32, AppliedScaling) {
        let by_difficulty = self.difficulty_adjustment(difficulty);
        let by_party = self.party_adjustment(context.party_size);

        let successes = base_successes as i32 + by_difficulty.successes + by_party.structure.successes;
        let failures = base_failures as i32 + by_difficulty.failures + by_party.structure.failures;

        let scaling = AppliedScaling {
            difficulty_successes: by_difficulty.successes,
            difficulty_failures: by_difficulty.failures,
            party_successes: by_party.structure.successes,
            party_failures: by_party.structure.failures,
            party_dc: by_party.dc,
            level_dc: self.level_dc_adjustment(context.party_level),
        };

        (
            successes.max(ChallengeStructure::MIN_SUCCESSES as i32) as u32,
            failures.max(ChallengeStructure::MIN_FAILURES as i32) as u32,
            scaling,
        )
    }
}
