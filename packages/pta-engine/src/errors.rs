//! Error types for pta-engine
//!
//! Provides unified error handling across the crate. The taxonomy follows the
//! solver's failure semantics:
//! - **UnsupportedConstruct**: fatal, the run aborts (continuing would be unsound)
//! - **InconsistentProgram**: fatal, the frontend contract was violated
//! - **Plugin**: fatal, a plugin failed inside the shared fixpoint state
//!
//! Unresolved virtual dispatch is *not* an error; it is recorded as a
//! [`Diagnostic`](crate::features::points_to::domain::Diagnostic).

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for pta-engine operations
#[derive(Debug, Error)]
pub enum PtaError {
    /// A construct the core solver does not model was reached
    #[error("Unsupported construct in {method}: {construct}")]
    UnsupportedConstruct { method: String, construct: String },

    /// The program representation violates the frontend contract
    #[error("Inconsistent program: {0}")]
    InconsistentProgram(String),

    /// A plugin hook failed
    #[error("Plugin '{plugin}' failed: {message}")]
    Plugin { plugin: String, message: String },

    /// An entry point could not be found
    #[error("Unknown entry method: {0}")]
    UnknownEntry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PtaError {
    /// Create an unsupported-construct error
    pub fn unsupported(method: impl Into<String>, construct: impl Into<String>) -> Self {
        PtaError::UnsupportedConstruct {
            method: method.into(),
            construct: construct.into(),
        }
    }

    /// Create an inconsistent-program error
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        PtaError::InconsistentProgram(msg.into())
    }

    /// Create a plugin error
    pub fn plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        PtaError::Plugin {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Whether the error aborts the analysis run
    ///
    /// Every variant is fatal today; configuration errors surface before a run
    /// starts.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PtaError::Config(_))
    }
}

/// Result type alias for pta-engine operations
pub type Result<T> = std::result::Result<T, PtaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_construct() {
        let err = PtaError::unsupported("Main.main()", "dynamic call site #3");
        assert_eq!(
            err.to_string(),
            "Unsupported construct in Main.main(): dynamic call site #3"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_plugin_error() {
        let err = PtaError::plugin("profiler", "boom");
        assert_eq!(err.to_string(), "Plugin 'profiler' failed: boom");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: PtaError = ConfigError::UnknownContextStrategy("3-foo".to_string()).into();
        assert!(matches!(err, PtaError::Config(_)));
        assert!(!err.is_fatal());
    }
}
