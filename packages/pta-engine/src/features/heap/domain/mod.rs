//! Heap domain: abstract objects

pub mod obj;

pub use obj::{Obj, ObjId, ObjKind};
