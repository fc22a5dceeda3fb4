//! Input handling module

pub mod document_file;
pub mod glob_resolver;

pub use document_file::{AnnotationRecord, DocumentFile};
pub use glob_resolver::resolve_patterns;
