/*
 * pta-engine - Context-Sensitive Points-to Analysis
 *
 * Feature-First Hexagonal Architecture:
 * - config/     : Presets, YAML loading, context strategies
 * - shared/     : Typed index ids
 * - features/   : Vertical slices (program → heap → context → points_to)
 * - errors.rs   : Crate error type
 *
 * Solver:
 * - Inclusion-based propagation over a pointer flow graph
 * - On-the-fly call graph with class-initializer ordering
 * - ci / k-call / k-obj / k-type context selection
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Transfer helpers take (ctx, var) pairs
#![allow(clippy::type_complexity)] // Hash-consing keys are tuples
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::len_without_is_empty)] // Arena lengths only

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Analysis configuration (presets, YAML, context strategies)
pub mod config;

/// Error types
pub mod errors;

/// Feature modules
pub mod features;

/// Shared utilities
pub mod shared;

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, ContextStrategy, HeapModelConfig, Preset, PtaConfig};
pub use errors::{PtaError, Result};
pub use features::context::{Context, ContextElement, ContextId, ContextSelector};
pub use features::heap::{HeapModel, Obj, ObjId, ObjKind};
pub use features::points_to::{
    AnalysisStats, CSMethodId, CSObjId, CSVarId, CallEdge, CallGraph, Diagnostic, Plugin,
    PointerAnalysis, PointerAnalysisResult, PointsToSet, Profiler, Solver,
};
pub use features::program::{CallKind, MethodRef, Program, ProgramBuilder};
