//! Pointer Flow Edges

use super::cs_element::PointerId;
use crate::features::program::TypeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why objects flow along an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    LocalAssign,
    Cast,
    InstanceLoad,
    InstanceStore,
    ArrayLoad,
    ArrayStore,
    StaticLoad,
    StaticStore,
    ParameterPassing,
    Return,
    /// Edges added by plugins
    Other,
}

impl FlowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::LocalAssign => "local-assign",
            FlowKind::Cast => "cast",
            FlowKind::InstanceLoad => "instance-load",
            FlowKind::InstanceStore => "instance-store",
            FlowKind::ArrayLoad => "array-load",
            FlowKind::ArrayStore => "array-store",
            FlowKind::StaticLoad => "static-load",
            FlowKind::StaticStore => "static-store",
            FlowKind::ParameterPassing => "parameter-passing",
            FlowKind::Return => "return",
            FlowKind::Other => "other",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `source → target`, optionally admitting only objects assignable to `filter`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerFlowEdge {
    pub kind: FlowKind,
    pub source: PointerId,
    pub target: PointerId,
    pub filter: Option<TypeId>,
}

impl PointerFlowEdge {
    pub fn new(kind: FlowKind, source: PointerId, target: PointerId) -> Self {
        Self {
            kind,
            source,
            target,
            filter: None,
        }
    }

    pub fn with_filter(mut self, ty: TypeId) -> Self {
        self.filter = Some(ty);
        self
    }
}
