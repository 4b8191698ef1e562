//! Points-to application layer
//!
//! - `analyzer`: the `PointerAnalysis` builder that configures and runs a solver
//! - `result`: the immutable result and its queries
//! - `profiler`: a plugin reporting per-method context counts

pub mod analyzer;
pub mod profiler;
pub mod result;

pub use analyzer::PointerAnalysis;
pub use profiler::{MethodProfile, ProfileHandle, ProfileReport, Profiler};
pub use result::{AnalysisStats, PointerAnalysisResult};
