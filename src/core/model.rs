//! Report model
//!
//! Every outcome of a run (per-document summaries, candidate actions, errors)
//! is mapped to a `ReportItem` before rendering.

use serde::{Deserialize, Serialize};

use crate::core::error::PruneError;

/// The kind of report item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Per-document header: asset directory and references
    Document,
    /// Dry run: the file would be deleted
    WouldDelete,
    /// The file was deleted
    Deleted,
    /// The user declined, or the run was aborted first
    Kept,
    /// Deletion was attempted and failed
    Failed,
    /// The document could not be processed
    Error,
    /// An input path was ignored
    Warning,
}

/// Structured error attached to a report item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub message: String,
}

impl ReportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&PruneError> for ReportError {
    fn from(err: &PruneError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Per-document details carried by `Kind::Document` items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Asset directory derived from the document path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_dir: Option<String>,

    /// Whether the asset directory exists
    #[serde(default)]
    pub asset_dir_exists: bool,

    /// Referenced file names, sorted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,

    /// Number of files in the asset directory
    #[serde(default)]
    pub asset_count: usize,

    /// Number of unreferenced files
    #[serde(default)]
    pub unused_count: usize,
}

/// A single report entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    /// The kind of this item
    pub kind: Kind,

    /// Markdown document this item belongs to, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Asset file (or ignored input path) this item refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Document details (only for `Kind::Document`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ReportError>,
}

impl ReportItem {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            document: None,
            path: None,
            meta: None,
            errors: Vec::new(),
        }
    }

    /// Create a document header
    pub fn document(document: impl Into<String>, meta: Meta) -> Self {
        Self {
            document: Some(document.into()),
            meta: Some(meta),
            ..Self::new(Kind::Document)
        }
    }

    /// Create an action item for an asset file
    pub fn action(kind: Kind, document: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            path: Some(path.into()),
            ..Self::new(kind)
        }
    }

    /// Create a document-level error
    pub fn error(document: impl Into<String>, error: ReportError) -> Self {
        Self {
            document: Some(document.into()),
            errors: vec![error],
            ..Self::new(Kind::Error)
        }
    }

    /// Create a warning about an ignored input path
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            errors: vec![ReportError::new("PATH_IGNORED", message)],
            ..Self::new(Kind::Warning)
        }
    }

    /// Add an error
    pub fn with_error(mut self, error: ReportError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Aggregated counts for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub documents: usize,
    pub candidates: usize,
    pub would_delete: usize,
    pub deleted: usize,
    pub kept: usize,
    pub failed: usize,
    pub document_errors: usize,
    pub dry_run: bool,
    pub aborted: bool,
}

/// Report set containing every item of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSet {
    pub items: Vec<ReportItem>,

    /// Set for runs that only report
    #[serde(default)]
    pub dry_run: bool,

    /// Set when the user aborted an interactive run
    #[serde(default)]
    pub aborted: bool,
}

impl ReportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: ReportItem) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of the given kind
    #[allow(dead_code)]
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &ReportItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    /// Count items per kind
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            dry_run: self.dry_run,
            aborted: self.aborted,
            ..Summary::default()
        };
        for item in &self.items {
            match item.kind {
                Kind::Document => summary.documents += 1,
                Kind::WouldDelete => summary.would_delete += 1,
                Kind::Deleted => summary.deleted += 1,
                Kind::Kept => summary.kept += 1,
                Kind::Failed => summary.failed += 1,
                Kind::Error => summary.document_errors += 1,
                Kind::Warning => {}
            }
        }
        summary.candidates = summary.would_delete + summary.deleted + summary.kept + summary.failed;
        summary
    }

    /// Whether any document failed to process
    pub fn has_document_errors(&self) -> bool {
        self.items.iter().any(|item| item.kind == Kind::Error)
    }
}

impl FromIterator<ReportItem> for ReportSet {
    fn from_iter<T: IntoIterator<Item = ReportItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
