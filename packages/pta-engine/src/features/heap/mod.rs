//! Heap Abstraction
//!
//! Abstract objects and the allocation-site heap model that produces them.

pub mod domain;
pub mod infrastructure;

pub use domain::{Obj, ObjId, ObjKind};
pub use infrastructure::HeapModel;
