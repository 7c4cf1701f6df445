//! Error types for document scanning and asset pruning

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while processing a single document
#[derive(Debug, Error)]
pub enum PruneError {
    #[error("document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    #[error("cannot read document {}: {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list asset directory {}: {source}", path.display())]
    AssetDirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete {}: {source}", path.display())]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl PruneError {
    /// Stable machine-readable code carried into report items
    pub fn code(&self) -> &'static str {
        match self {
            PruneError::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            PruneError::DocumentRead { .. } => "DOCUMENT_READ_ERROR",
            PruneError::AssetDirectoryRead { .. } => "ASSET_DIR_READ_ERROR",
            PruneError::DeletionFailed { .. } => "DELETION_FAILED",
            PruneError::Prompt(_) => "PROMPT_FAILED",
        }
    }
}

pub type PruneResult<T> = std::result::Result<T, PruneError>;
