//! Party context used when generating a challenge

use serde::{Deserialize, Serialize};

/// Upper bound on `minimum_solutions`; generation never synthesizes more
pub const MAX_SOLUTIONS: usize = 12;

/// Who is facing the challenge, and under which constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyContext {
    pub party_size: u32,
    pub party_level: u32,
    pub has_time_limit: bool,
    /// Minimum number of distinct skill options the challenge must offer
    pub minimum_solutions: usize,
}

impl Default for PartyContext {
    fn default() -> Self {
        Self {
            party_size: 4,
            party_level: 5,
            has_time_limit: false,
            minimum_solutions: 3,
        }
    }
}

impl PartyContext {
    pub fn new(party_size: u32, party_level: u32) -> Self {
        Self {
            party_size,
            party_level,
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self) -> Self {
        self.has_time_limit = true;
        self
    }

    pub fn with_minimum_solutions(mut self, minimum: usize) -> Self {
        self.minimum_solutions = minimum;
        self
    }
}
