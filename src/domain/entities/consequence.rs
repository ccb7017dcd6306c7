//! Consequences handed out when a challenge concludes

use serde::{Deserialize, Serialize};

/// Narrative result plus the mechanical effects a GM should apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequenceSet {
    pub description: String,
    pub effects: Vec<String>,
}

impl ConsequenceSet {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }
}

/// The five consequence tiers of a challenge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConsequences {
    pub success: ConsequenceSet,
    pub failure: ConsequenceSet,
    pub partial: ConsequenceSet,
    pub critical_success: ConsequenceSet,
    pub critical_failure: ConsequenceSet,
}
