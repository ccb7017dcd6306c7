//! Domain services - challenge generation, resolution and advice
//!
//! Everything here is synchronous and free of I/O. Generation pulls from the
//! template catalog and scaling rules; play runs through the progression
//! state machine and the completion evaluator.

mod challenge_engine;
mod completion_evaluator;
mod consequence_generator;
mod dynamic_element_catalog;
mod progression_state_machine;
mod scaling_rules;
mod skill_option_generator;
mod structure_builder;
mod suggestion_advisor;
mod template_catalog;

pub use challenge_engine::{GenerationRequest, SkillChallengeEngine};
pub use completion_evaluator::{CompletionEvaluator, CompletionReport};
pub use consequence_generator::ConsequenceGenerator;
pub use dynamic_element_catalog::{DynamicElementCatalog, COMPLICATIONS_MOUNT, MOMENTUM_BUILDS};
pub use progression_state_machine::{
    compute_final_dc, AttemptRejection, DcBreakdown, ProgressSnapshot, ProgressionStateMachine,
    SkillAttemptInput, SkillAttemptResult, TriggeredElement, MAX_DC, MIN_DC,
};
pub use scaling_rules::{LevelBand, PartyAdjustment, ScalingRules, StructureAdjustment};
pub use skill_option_generator::SkillOptionGenerator;
pub use structure_builder::StructureBuilder;
pub use suggestion_advisor::{SkillSuggestion, SuggestionAdvisor, SuggestionContext, MAX_SUGGESTIONS};
pub use template_catalog::{
    affinities_for, CatalogError, ChallengeTemplate, EnvironmentalTwist, TemplateCatalog,
};
