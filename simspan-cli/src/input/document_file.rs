//! JSON document files
//!
//! A document file carries the text and its annotations by type name:
//!
//! ```json
//! { "text": "TP53 binds MDM2.", "annotations": [ { "type": "Gene", "begin": 0, "end": 4 } ] }
//! ```
//!
//! Offsets are UTF-8 byte offsets into `text`.

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use simspan_core::{Document, TypeSystem};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// One annotation in a document file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Inclusive begin offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

/// Serialized document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Document text
    pub text: String,
    /// Annotations in any order
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
}

impl DocumentFile {
    /// Read and parse a document file
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| CliError::InvalidDocument(format!("{}: {e}", path.display())).into())
    }

    /// Distinct type names used by the annotations
    pub fn type_names(&self) -> BTreeSet<&str> {
        self.annotations
            .iter()
            .map(|a| a.type_name.as_str())
            .collect()
    }

    /// Type system declaring every name used by `files` as a concrete root type
    ///
    /// Only names that occur in some file are declared, so a configured type
    /// that none of them uses stays unresolvable.
    pub fn implicit_type_system<'a>(
        files: impl IntoIterator<Item = &'a DocumentFile>,
    ) -> Result<TypeSystem> {
        files
            .into_iter()
            .flat_map(DocumentFile::type_names)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .fold(TypeSystem::builder(), |builder, name| builder.declare(name))
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load into an annotated document
    pub fn into_document(self, type_system: Arc<TypeSystem>) -> Result<Document> {
        let mut doc = Document::new(self.text, type_system);
        for record in &self.annotations {
            doc.annotate(&record.type_name, record.begin, record.end)
                .map_err(|e| {
                    CliError::InvalidDocument(format!(
                        "{} {}..{}: {e}",
                        record.type_name, record.begin, record.end
                    ))
                })?;
        }
        Ok(doc)
    }

    /// Serialize a document, annotations in index order
    pub fn from_document(doc: &Document) -> Self {
        let type_system = doc.type_system();
        Self {
            text: doc.text().to_string(),
            annotations: doc
                .annotations()
                .iter()
                .map(|a| AnnotationRecord {
                    type_name: type_system.name(a.type_handle()).to_string(),
                    begin: a.begin(),
                    end: a.end(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "text": "TP53 binds MDM2.",
        "annotations": [
            { "type": "Sentence", "begin": 0, "end": 16 },
            { "type": "Gene", "begin": 0, "end": 4 }
        ]
    }"#;

    #[test]
    fn test_read_and_convert() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, SAMPLE).unwrap();

        let file = DocumentFile::read(&path).unwrap();
        assert_eq!(file.type_names().into_iter().collect::<Vec<_>>(), vec!["Gene", "Sentence"]);

        let types = Arc::new(DocumentFile::implicit_type_system([&file]).unwrap());
        assert!(types.get("Gene").is_some());
        assert!(types.get("Chemical").is_none());

        let doc = file.clone().into_document(types).unwrap();
        assert_eq!(doc.annotations().len(), 2);

        let back = DocumentFile::from_document(&doc);
        assert_eq!(back.text, file.text);
        assert_eq!(back.annotations, file.annotations);
    }

    #[test]
    fn test_implicit_types_cover_all_files() {
        let genes: DocumentFile = serde_json::from_str(SAMPLE).unwrap();
        let chemicals: DocumentFile = serde_json::from_str(
            r#"{ "text": "NaCl", "annotations": [ { "type": "Chemical", "begin": 0, "end": 4 } ] }"#,
        )
        .unwrap();

        let types = DocumentFile::implicit_type_system([&genes, &chemicals]).unwrap();
        let mut names: Vec<&str> = types.handles().map(|h| types.name(h)).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Chemical", "Gene", "Sentence"]);
    }

    #[test]
    fn test_annotations_default_to_empty() {
        let file: DocumentFile = serde_json::from_str(r#"{ "text": "plain" }"#).unwrap();
        assert!(file.annotations.is_empty());
    }

    #[test]
    fn test_out_of_range_annotation_rejected() {
        let file: DocumentFile = serde_json::from_str(
            r#"{ "text": "short", "annotations": [ { "type": "Gene", "begin": 2, "end": 40 } ] }"#,
        )
        .unwrap();
        let types = Arc::new(DocumentFile::implicit_type_system([&file]).unwrap());

        let err = file.into_document(types).unwrap_err();
        assert!(err.to_string().starts_with("Invalid document: Gene 2..40"));
    }

    #[test]
    fn test_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = DocumentFile::read(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid document:"));
    }
}
