//! Points-to infrastructure: the solver and the state it owns

pub mod call_graph;
pub mod class_initializer;
pub mod cs_manager;
pub mod pointer_flow_graph;
pub mod solver;
pub mod work_list;

pub use call_graph::CallGraph;
pub use class_initializer::ClassInitializer;
pub use cs_manager::CSManager;
pub use pointer_flow_graph::PointerFlowGraph;
pub use solver::{Solver, SolverState, SolverStats};
pub use work_list::{WorkItem, WorkList};
