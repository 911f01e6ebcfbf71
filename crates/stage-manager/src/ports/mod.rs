//! Ports for the scene manager subsystem.

pub mod inbound;
pub mod outbound;
