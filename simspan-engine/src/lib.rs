//! Span propagation over annotated documents
//!
//! Given a source type and a target type, the [`SpanPropagator`] finds every
//! verbatim occurrence of each source annotation's covered text inside the
//! target annotations of the same document and annotates the occurrences
//! that are not yet annotated with the source type.
//!
//! # Example
//!
//! ```rust
//! use simspan_core::{Document, TypeSystem};
//! use simspan_engine::{PropagatorConfig, SpanPropagator};
//! use std::sync::Arc;
//!
//! let types = TypeSystem::builder()
//!     .declare("Gene")
//!     .declare("Sentence")
//!     .build()
//!     .unwrap();
//!
//! let mut doc = Document::new("TP53 is a gene. We studied TP53.", Arc::new(types));
//! doc.annotate("Sentence", 0, 15).unwrap();
//! doc.annotate("Sentence", 16, 32).unwrap();
//! doc.annotate("Gene", 0, 4).unwrap();
//!
//! let config = PropagatorConfig::builder()
//!     .source_type("Gene")
//!     .target_type("Sentence")
//!     .respect_word_boundaries(true)
//!     .case_sensitive(true)
//!     .build()
//!     .unwrap();
//!
//! let report = SpanPropagator::new(config).unwrap().process(&mut doc).unwrap();
//! assert_eq!(report.created_count(), 1);
//! assert_eq!(doc.covered_text(&report.created[0]), "TP53");
//! ```

#![warn(missing_docs)]

pub mod collector;
pub mod config;
pub mod error;
pub mod merger;
pub mod pattern;
pub mod propagator;
pub mod scanner;

// Re-export key types
pub use collector::SourceIndex;
pub use config::{PropagatorConfig, PropagatorConfigBuilder};
pub use error::{PropagationError, Result};
pub use merger::DedupMerger;
pub use pattern::{PatternOptions, SpanPattern};
pub use propagator::{Discovery, PropagationReport, SpanPropagator};
pub use scanner::{CandidateScanner, MatchCandidate, ScanStats};

// Re-export from core for convenience
pub use simspan_core::{Annotation, Document, OffsetKey, TypeHandle, TypeSystem};
