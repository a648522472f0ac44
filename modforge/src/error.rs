//! Error types and error handling
//!
//! Only [`ModforgeError::InvalidModuleName`] aborts a whole run. Every other
//! variant is artifact-local: the generator records it as a failed outcome and
//! moves on to the next manifest entry.

use std::path::PathBuf;

use thiserror::Error;

/// Modforge error type
#[derive(Debug, Error)]
pub enum ModforgeError {
    /// The raw module name failed validation
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName {
        /// The offending input
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Neither a published override nor a bundled template exists
    #[error("Template '{template}' not found (searched {})", display_paths(.searched))]
    TemplateNotFound {
        /// Template id
        template: String,
        /// Locations that were checked, in resolution order
        searched: Vec<PathBuf>,
    },

    /// A filesystem operation failed
    #[error("{context}: {source}")]
    Filesystem {
        /// What was being attempted
        context: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The confirmation prompt could not be answered
    #[error("Confirmation prompt failed: {source}")]
    Prompt {
        /// Underlying terminal error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Default configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl ModforgeError {
    /// Build a [`ModforgeError::Filesystem`] with a context message
    pub fn filesystem(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Filesystem {
            context: context.into(),
            source,
        }
    }

    /// Build a [`ModforgeError::InvalidModuleName`]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModuleName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<figment::Error> for ModforgeError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "bundled stubs".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ModforgeError>;
