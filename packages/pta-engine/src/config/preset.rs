//! Preset configurations
//!
//! Presets pick the context-sensitivity policy, the main cost driver of a
//! points-to run.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Context-insensitive
    ///
    /// - Contexts: ci
    /// - Heap: strings, builders and exceptions merged per type
    Fast,

    /// One level of object sensitivity
    ///
    /// - Contexts: 1-obj
    /// - Heap: strings, builders and exceptions merged per type
    #[default]
    Balanced,

    /// Two levels of object sensitivity, no heap merging
    ///
    /// - Contexts: 2-obj
    /// - Heap: plain allocation sites (string constants still merged)
    Thorough,

    /// User-defined (YAML or builder API)
    Custom,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
