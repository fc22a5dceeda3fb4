//! Core error types

use thiserror::Error;

/// Errors raised by the document model and type system
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A type name that is not declared in the type system
    #[error("type '{name}' is not defined in the type system")]
    UnknownType {
        /// The unresolved type name
        name: String,
    },

    /// A type name declared twice
    #[error("type '{name}' is declared more than once")]
    DuplicateType {
        /// The duplicated type name
        name: String,
    },

    /// The type cannot be instantiated (abstract types)
    #[error("type '{name}' is abstract and cannot be instantiated")]
    NotConstructible {
        /// The abstract type name
        name: String,
    },

    /// A registered constructor rejected the request
    #[error("unable to create {name} annotation: {reason}")]
    Construction {
        /// The type being constructed
        name: String,
        /// Why construction failed
        reason: String,
    },

    /// Offsets outside the document or not on a character boundary
    #[error("invalid span {begin}..{end} for text of {len} bytes")]
    InvalidSpan {
        /// Begin offset in bytes
        begin: usize,
        /// End offset in bytes
        end: usize,
        /// Length of the document text in bytes
        len: usize,
    },

    /// Type system file could not be parsed
    #[error("invalid type system definition: {0}")]
    Definition(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
