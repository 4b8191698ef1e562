//! Domain models for the analyzed program
//!
//! The frontend contract of the solver:
//! - Types: class hierarchy with initializer presence
//! - Members: fields, methods, variables
//! - Statements: the fixed pointer-relevant statement vocabulary

pub mod members;
pub mod stmt;
pub mod types;

pub use members::{Field, FieldId, Method, MethodId, MethodRef, Var, VarId};
pub use stmt::{AllocSite, AllocSiteId, CallKind, CallSite, CallSiteId, Literal, LiteralId, Stmt};
pub use types::{TypeId, TypeInfo, TypeKind};
