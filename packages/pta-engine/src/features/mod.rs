//! Feature modules (vertical slices)
//!
//! - `program`: the analyzed program and its hierarchy queries
//! - `heap`: abstract objects
//! - `context`: contexts and context selectors
//! - `points_to`: the solver, its plugins and results

pub mod context;
pub mod heap;
pub mod points_to;
pub mod program;
