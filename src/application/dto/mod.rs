//! Data Transfer Objects - For API boundaries
//!
//! Request shapes arrive as loose strings and are parsed into domain types
//! here, so the HTTP layer never builds domain values by hand.

pub mod challenge;

pub use challenge::*;
