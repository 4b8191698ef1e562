//! Program Feature
//!
//! The analyzed program as the solver sees it: a class hierarchy, methods
//! with pointer-relevant statement lists, and the resolution/dispatch queries
//! over them.
//!
//! # Usage
//! ```ignore
//! use pta_engine::features::program::{CallKind, MethodRef, ProgramBuilder};
//!
//! let mut b = ProgramBuilder::new();
//! let object = b.add_class("Object", None);
//! let main = b.add_method(object, "main", "main(String[])", true);
//! let x = b.add_var(main, "x", object);
//! b.new_obj(main, x, object);
//! b.add_main(main);
//! let program = b.build()?;
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{FieldAccess, Program, ProgramBuilder, VarUses};
