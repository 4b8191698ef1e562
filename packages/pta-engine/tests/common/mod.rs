//! Common test utilities for pta-engine
//!
//! Shared program fixtures, random program generators and a recording
//! plugin for integration and property tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;
mod recorder;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use recorder::*;
