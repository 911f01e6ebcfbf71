//! # Stagehand Test Suite
//!
//! Unified test crate containing cross-subsystem choreography tests.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem choreography
//!     ├── handoff_flow.rs   # spawn → load → completion → retire previous
//!     └── sync_flow.rs      # late-join client synchronization
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p stage-tests
//!
//! # By category
//! cargo test -p stage-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
