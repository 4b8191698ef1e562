//! Points-to domain
//!
//! - `cs_element`: context-sensitive element ids and keys
//! - `pointer`: the four pointer kinds
//! - `points_to_set`: insertion-only sorted object sets
//! - `flow`: pointer flow edges
//! - `call_edge`: call graph edges
//! - `diagnostic`: non-fatal events recorded during a run

pub mod call_edge;
pub mod cs_element;
pub mod diagnostic;
pub mod flow;
pub mod pointer;
pub mod points_to_set;

pub use call_edge::{CallEdge, Edge};
pub use cs_element::{
    CSCallSite, CSCallSiteId, CSMethod, CSMethodId, CSObj, CSObjId, CSVar, CSVarId, PointerId,
};
pub use diagnostic::Diagnostic;
pub use flow::{FlowKind, PointerFlowEdge};
pub use pointer::Pointer;
pub use points_to_set::PointsToSet;
