//! In-memory annotated document
//!
//! A [`Document`] owns its text and an append-only annotation index kept in
//! natural index order. The type system is shared between documents of the
//! same pipeline run.

use crate::annotation::Annotation;
use crate::error::{CoreError, Result};
use crate::type_system::{TypeHandle, TypeSystem};
use std::sync::Arc;

/// A text with its annotation index
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    type_system: Arc<TypeSystem>,
    index: Vec<Annotation>,
}

impl Document {
    /// Create an unannotated document
    pub fn new(text: impl Into<String>, type_system: Arc<TypeSystem>) -> Self {
        Self {
            text: text.into(),
            type_system,
            index: Vec::new(),
        }
    }

    /// Document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Type system the document's annotations are declared in
    pub fn type_system(&self) -> &Arc<TypeSystem> {
        &self.type_system
    }

    /// Resolve a declared type name
    pub fn resolve_type(&self, name: &str) -> Result<TypeHandle> {
        self.type_system.resolve(name)
    }

    /// All annotations in index order
    pub fn annotations(&self) -> &[Annotation] {
        &self.index
    }

    /// Annotations of `type_handle` or any of its subtypes, in index order
    pub fn annotations_of(&self, type_handle: TypeHandle) -> impl Iterator<Item = &Annotation> + '_ {
        self.index
            .iter()
            .filter(move |a| self.type_system.subsumes(type_handle, a.type_handle()))
    }

    /// Text covered by an annotation
    ///
    /// Returns an empty string for spans that do not fit this document.
    pub fn covered_text(&self, annotation: &Annotation) -> &str {
        self.text
            .get(annotation.begin()..annotation.end())
            .unwrap_or("")
    }

    /// Check that `begin..end` is a valid span of the text
    pub fn check_span(&self, begin: usize, end: usize) -> Result<()> {
        if begin <= end
            && end <= self.text.len()
            && self.text.is_char_boundary(begin)
            && self.text.is_char_boundary(end)
        {
            Ok(())
        } else {
            Err(CoreError::InvalidSpan {
                begin,
                end,
                len: self.text.len(),
            })
        }
    }

    /// Instantiate an annotation through the type's registered constructor
    ///
    /// The annotation is not indexed until passed to [`Self::add_annotation`].
    pub fn create_annotation(
        &self,
        type_handle: TypeHandle,
        begin: usize,
        end: usize,
    ) -> Result<Annotation> {
        self.check_span(begin, end)?;
        let constructor = self.type_system.constructor(type_handle)?;
        let annotation =
            (*constructor)(type_handle, begin, end).map_err(|reason| CoreError::Construction {
                name: self.type_system.name(type_handle).to_string(),
                reason,
            })?;
        if annotation.begin() != begin || annotation.end() != end {
            return Err(CoreError::Construction {
                name: self.type_system.name(type_handle).to_string(),
                reason: format!(
                    "constructor returned span {}..{}, expected {begin}..{end}",
                    annotation.begin(),
                    annotation.end()
                ),
            });
        }
        Ok(annotation)
    }

    /// Append an annotation to the index
    pub fn add_annotation(&mut self, annotation: Annotation) -> Result<()> {
        self.check_span(annotation.begin(), annotation.end())?;
        let position = self.index.partition_point(|existing| existing <= &annotation);
        self.index.insert(position, annotation);
        Ok(())
    }

    /// Append a batch of annotations in one merge pass over the index
    ///
    /// All spans are checked before the index changes.
    pub fn add_annotations(
        &mut self,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> Result<()> {
        let mut added: Vec<Annotation> = annotations.into_iter().collect();
        for annotation in &added {
            self.check_span(annotation.begin(), annotation.end())?;
        }
        added.sort();

        let mut existing = std::mem::take(&mut self.index).into_iter().peekable();
        let mut merged = Vec::with_capacity(existing.len() + added.len());
        for annotation in added {
            while let Some(head) = existing.next_if(|e| e <= &annotation) {
                merged.push(head);
            }
            merged.push(annotation);
        }
        merged.extend(existing);
        self.index = merged;
        Ok(())
    }

    /// Resolve, create and index an annotation in one step
    pub fn annotate(&mut self, type_name: &str, begin: usize, end: usize) -> Result<Annotation> {
        let type_handle = self.resolve_type(type_name)?;
        let annotation = self.create_annotation(type_handle, begin, end)?;
        self.add_annotation(annotation)?;
        Ok(annotation)
    }
}
