//! Configuration I/O (YAML)
//!
//! File schema v1:
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:            # optional, partial
//!   context_sensitivity: 2-type
//!   heap:
//!     merge_string_constants: true
//! ```
//!
//! Overrides are merged key-by-key over the preset's configuration, so a
//! file only spells out what differs from its preset.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::pta_config::PtaConfig;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// Supported schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    #[serde(default)]
    pub preset: Preset,

    /// Partial overrides on top of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Value>,
}

impl PtaConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        if !SUPPORTED_VERSIONS.contains(&file.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let base = PtaConfig::from_preset(file.preset);
        let config = match file.overrides {
            Some(overrides) => {
                let mut merged = serde_yaml::to_value(&base)?;
                merge_values(&mut merged, overrides);
                serde_yaml::from_value(merged)?
            }
            None => base,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Export as a complete v1 file (preset `custom`, every field spelled out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            preset: Preset::Custom,
            overrides: Some(serde_yaml::to_value(self)?),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

/// Recursively overlay `overlay` onto `base`; mappings merge, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
