//! Contexts and Context Selection
//!
//! - `domain`: k-limited context tuples and their interned ids
//! - `infrastructure`: the selectors (ci, k-call, k-obj, k-type)

pub mod domain;
pub mod infrastructure;

pub use domain::{Context, ContextElement, ContextId};
pub use infrastructure::{ContextSelector, Receiver};
