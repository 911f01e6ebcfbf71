//! Cross-subsystem integration tests.

pub mod handoff_flow;
pub mod sync_flow;
