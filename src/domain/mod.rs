//! Domain layer - Core challenge logic with no external dependencies
//!
//! This layer contains:
//! - Entities: the structured challenge, its options, consequences and progression
//! - Value Objects: theme, difficulty, momentum, outcomes and identifiers
//! - Domain Services: generation, the progression state machine and advice

pub mod entities;
pub mod services;
pub mod value_objects;
