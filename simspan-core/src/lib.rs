//! Annotated document model for span propagation
//!
//! This crate provides the annotation store the propagator works against:
//! a [`TypeSystem`] of declared annotation types with a constructor
//! registry, and a [`Document`] holding text plus an append-only index of
//! typed [`Annotation`] spans.
//!
//! # Example
//!
//! ```rust
//! use simspan_core::{Document, TypeSystem};
//! use std::sync::Arc;
//!
//! let types = TypeSystem::builder()
//!     .declare("Sentence")
//!     .declare("Gene")
//!     .build()
//!     .unwrap();
//!
//! let mut doc = Document::new("BRCA1 is a gene.", Arc::new(types));
//! let gene = doc.annotate("Gene", 0, 5).unwrap();
//! assert_eq!(doc.covered_text(&gene), "BRCA1");
//! ```

#![warn(missing_docs)]

pub mod annotation;
pub mod document;
pub mod error;
pub mod type_system;

pub use annotation::{Annotation, OffsetKey};
pub use document::Document;
pub use error::{CoreError, Result};
pub use type_system::{
    AnnotationConstructor, TypeDefinition, TypeHandle, TypeSystem, TypeSystemBuilder,
    TypeSystemDefinition,
};
