// ABOUTME: Library root for slotctl - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod cluster;
pub mod error;
pub mod output;
pub mod rollout;
pub mod types;
