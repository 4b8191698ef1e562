//! Shared utilities
//!
//! - `macros`: typed index ids used by every arena in the crate

pub mod macros;
