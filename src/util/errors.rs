//! Configuration error taxonomy.
//!
//! Every error here is a stop condition: recipes abort configuration
//! immediately and surface the message to the invoking orchestrator.
//! There are no retries and no partial success.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving and translating a recipe configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A side-loaded resource the recipe depends on is absent.
    #[error("cannot find dependency descriptor: {path}")]
    MissingDescriptor { path: PathBuf },

    /// A descriptor file exists but could not be understood.
    #[error("malformed dependency descriptor {path}: {reason}")]
    MalformedDescriptor { path: PathBuf, reason: String },

    /// A required external tool is not installed.
    #[error("{tool} not found. {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// The caller supplied an option the recipe does not declare.
    #[error("package `{package}` has no option `{name}`")]
    UnknownOption { package: String, name: String },

    /// An option value falls outside its declared domain.
    #[error("invalid value for option `{name}`: {reason}")]
    InvalidOptionValue { name: String, reason: String },

    /// The resolved configuration is inconsistent with the environment
    /// or with itself.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The recipe's option set does not line up with its side-loaded
    /// metadata. Caught during recipe maintenance, not end-user builds.
    #[error("recipe authoring mismatch: {0}")]
    AuthoringMismatch(String),

    /// The requested package version has no recipe data.
    #[error("package `{package}` has no recipe data for version {version}")]
    UnknownVersion { package: String, version: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MissingDescriptor {
            path: PathBuf::from("descriptors/boost-1.89.0.toml"),
        };
        assert!(err.to_string().contains("boost-1.89.0.toml"));

        let err = ConfigError::UnknownOption {
            package: "boost".to_string(),
            name: "with_nonexistent".to_string(),
        };
        assert!(err.to_string().contains("with_nonexistent"));

        let err = ConfigError::ToolNotFound {
            tool: "cmake".to_string(),
            hint: "Install CMake and ensure it is in your PATH.".to_string(),
        };
        assert!(err.to_string().starts_with("cmake not found"));
    }
}
