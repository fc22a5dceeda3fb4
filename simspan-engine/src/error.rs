//! Propagation error types

use simspan_core::CoreError;
use thiserror::Error;

/// Errors that abort propagation for a document
///
/// No annotations are committed when any of these is returned.
#[derive(Error, Debug)]
pub enum PropagationError {
    /// Configured source or target type is not declared
    #[error("type '{name}' is not defined in the type system")]
    Configuration {
        /// The unresolved type name
        name: String,
    },

    /// The source type cannot be instantiated
    #[error("unable to create {name} annotation: {reason}")]
    AnnotationConstruction {
        /// The source type name
        name: String,
        /// Why construction failed
        reason: String,
    },

    /// Missing or malformed configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Regex engine refused a literal pattern beyond its scaled size limits
    #[error("pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other document model error
    #[error("document error: {0}")]
    Core(CoreError),
}

impl From<CoreError> for PropagationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownType { name } => PropagationError::Configuration { name },
            CoreError::NotConstructible { name } => PropagationError::AnnotationConstruction {
                name,
                reason: "type is abstract".to_string(),
            },
            CoreError::Construction { name, reason } => {
                PropagationError::AnnotationConstruction { name, reason }
            }
            other => PropagationError::Core(other),
        }
    }
}

/// Result type for propagation
pub type Result<T> = std::result::Result<T, PropagationError>;
