//! Analysis Configuration
//!
//! Three ways to configure a run, from simplest to most explicit:
//! - Preset: `PtaConfig::from_preset(Preset::Balanced)`
//! - Builder setters: `.context_sensitivity("2-type".parse()?)`
//! - YAML file: `PtaConfig::from_yaml_file("pta.yaml")?`
//!
//! # Examples
//!
//! ```rust,ignore
//! use pta_engine::config::{ContextStrategy, PtaConfig, Preset};
//!
//! let config = PtaConfig::from_preset(Preset::Fast)
//!     .context_sensitivity(ContextStrategy::Object(2))
//!     .main_args(false);
//! config.validate()?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod pta_config;

pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use preset::Preset;
pub use pta_config::{ContextStrategy, HeapModelConfig, PtaConfig, MAX_CONTEXT_DEPTH};
