//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory challenge store
//! - HTTP: REST API routes
//! - Narrative: built-in prose and the Ollama client
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod narrative;
pub mod ollama;
pub mod persistence;
pub mod state;
