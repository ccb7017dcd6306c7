//! Application layer - Use cases and orchestration
//!
//! This layer contains:
//! - DTOs: request and summary shapes for the API boundary
//! - Ports: store and narrative interfaces implemented by infrastructure
//! - Services: the async challenge use cases

pub mod dto;
pub mod ports;
pub mod services;
