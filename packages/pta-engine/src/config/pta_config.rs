//! Points-to Analysis Configuration
//!
//! - `ContextStrategy`: closed set of context-sensitivity variants, parsed
//!   from the conventional spellings (`ci`, `1-call`, `2-obj`, `2-type`)
//! - `HeapModelConfig`: which allocation categories are merged per type
//! - `PtaConfig`: everything an analysis run reads

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound for the `k` of any k-limited strategy
pub const MAX_CONTEXT_DEPTH: usize = 8;

// ============================================================================
// Context Strategy
// ============================================================================

/// Context-sensitivity variant
///
/// Serialized as its conventional string form so YAML files read naturally:
/// `context_sensitivity: 2-obj`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContextStrategy {
    /// All contexts are empty
    #[default]
    Insensitive,

    /// k most recent call sites
    CallSite(usize),

    /// k most recent receiver objects
    Object(usize),

    /// k most recent receiver allocation-container types
    Type(usize),
}

impl ContextStrategy {
    /// Call-context depth `k` (0 for context-insensitive)
    #[inline]
    pub fn k(&self) -> usize {
        match self {
            Self::Insensitive => 0,
            Self::CallSite(k) | Self::Object(k) | Self::Type(k) => *k,
        }
    }

    /// Heap-context depth (`k - 1`, never negative)
    #[inline]
    pub fn heap_k(&self) -> usize {
        self.k().saturating_sub(1)
    }

    pub fn is_insensitive(&self) -> bool {
        matches!(self, Self::Insensitive)
    }
}

impl fmt::Display for ContextStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insensitive => write!(f, "ci"),
            Self::CallSite(k) => write!(f, "{}-call", k),
            Self::Object(k) => write!(f, "{}-obj", k),
            Self::Type(k) => write!(f, "{}-type", k),
        }
    }
}

impl FromStr for ContextStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized == "ci" {
            return Ok(Self::Insensitive);
        }
        let unknown = || ConfigError::UnknownContextStrategy(s.to_string());
        let (k, kind) = normalized.split_once('-').ok_or_else(unknown)?;
        let k: usize = k.parse().map_err(|_| unknown())?;
        match kind {
            "call" | "cs" => Ok(Self::CallSite(k)),
            "obj" | "object" => Ok(Self::Object(k)),
            "type" => Ok(Self::Type(k)),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for ContextStrategy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContextStrategy> for String {
    fn from(value: ContextStrategy) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Heap Model
// ============================================================================

/// Type-merging switches of the allocation-site heap model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeapModelConfig {
    /// All string constants become one merged object
    pub merge_string_constants: bool,

    /// All allocations of the string type become one object
    pub merge_string_objects: bool,

    /// All allocations of a string-builder type become one object per type
    pub merge_string_builders: bool,

    /// All allocations of a throwable subtype become one object per type
    pub merge_exception_objects: bool,

    pub string_type: String,
    pub string_builder_types: Vec<String>,
    pub throwable_type: String,
}

impl Default for HeapModelConfig {
    fn default() -> Self {
        Self {
            merge_string_constants: false,
            merge_string_objects: true,
            merge_string_builders: true,
            merge_exception_objects: true,
            string_type: "java.lang.String".to_string(),
            string_builder_types: vec![
                "java.lang.StringBuilder".to_string(),
                "java.lang.StringBuffer".to_string(),
            ],
            throwable_type: "java.lang.Throwable".to_string(),
        }
    }
}

impl HeapModelConfig {
    /// Plain allocation-site abstraction, nothing merged
    pub fn allocation_site() -> Self {
        Self {
            merge_string_constants: false,
            merge_string_objects: false,
            merge_string_builders: false,
            merge_exception_objects: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if (self.merge_string_constants || self.merge_string_objects)
            && self.string_type.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "heap.string_type must be set when string merging is enabled".to_string(),
            ));
        }
        if self.merge_exception_objects && self.throwable_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "heap.throwable_type must be set when exception merging is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Points-to analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PtaConfig {
    /// Context-selection strategy
    pub context_sensitivity: ContextStrategy,

    /// Also treat the frontend's implicit entries as entry methods
    pub implicit_entries: bool,

    /// Seed `main(String[])` parameters with mock argument objects
    pub main_args: bool,

    pub heap: HeapModelConfig,
}

impl PtaConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let strategy = self.context_sensitivity;
        if !strategy.is_insensitive() {
            let k = strategy.k();
            if k == 0 || k > MAX_CONTEXT_DEPTH {
                return Err(ConfigError::range_with_hint(
                    "context_sensitivity.k",
                    k,
                    1,
                    MAX_CONTEXT_DEPTH,
                    "Use 'ci' for a context-insensitive analysis",
                ));
            }
        }
        self.heap.validate()
    }

    /// Builder: Set context_sensitivity
    pub fn context_sensitivity(mut self, v: ContextStrategy) -> Self {
        self.context_sensitivity = v;
        self
    }

    /// Builder: Set implicit_entries
    pub fn implicit_entries(mut self, v: bool) -> Self {
        self.implicit_entries = v;
        self
    }

    /// Builder: Set main_args
    pub fn main_args(mut self, v: bool) -> Self {
        self.main_args = v;
        self
    }

    /// Builder: Set heap
    pub fn heap(mut self, v: HeapModelConfig) -> Self {
        self.heap = v;
        self
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                context_sensitivity: ContextStrategy::Insensitive,
                implicit_entries: true,
                main_args: true,
                heap: HeapModelConfig::default(),
            },
            Preset::Balanced => Self {
                context_sensitivity: ContextStrategy::Object(1),
                implicit_entries: true,
                main_args: true,
                heap: HeapModelConfig::default(),
            },
            Preset::Thorough => Self {
                context_sensitivity: ContextStrategy::Object(2),
                implicit_entries: true,
                main_args: true,
                heap: HeapModelConfig {
                    merge_string_constants: true,
                    ..HeapModelConfig::allocation_site()
                },
            },
            Preset::Custom => Self {
                context_sensitivity: ContextStrategy::Insensitive,
                implicit_entries: false,
                main_args: false,
                heap: HeapModelConfig::allocation_site(),
            },
        }
    }
}

impl Default for PtaConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Fast)
    }
}
