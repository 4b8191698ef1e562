//! Program infrastructure
//!
//! - `builder`: mutable collector with a terminal `build()`
//! - `program`: the frozen, queryable program

pub mod builder;
pub mod program;

pub use builder::ProgramBuilder;
pub use program::{FieldAccess, Program, VarUses};
