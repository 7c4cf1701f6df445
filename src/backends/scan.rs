//! Filesystem scanning backend
//!
//! Uses walkdir, limited to depth 1: asset directories are never entered
//! recursively and directory arguments only contribute their immediate
//! Markdown files.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{PruneError, PruneResult};
use crate::core::model::ReportItem;
use crate::core::paths::{file_name_string, is_markdown, normalize_path};

/// A file directly inside an asset directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AssetFile {
    /// Basename, compared against referenced names
    pub name: String,
    /// Full path used for deletion
    pub path: PathBuf,
}

impl AssetFile {
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = file_name_string(&path)?;
        Some(Self { name, path })
    }
}

/// List the regular files directly under `asset_dir`, sorted by name.
///
/// Returns `Ok(None)` if the directory does not exist.
pub fn list_asset_files(asset_dir: &Path) -> PruneResult<Option<Vec<AssetFile>>> {
    if !asset_dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(asset_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| PruneError::AssetDirectoryRead {
            path: asset_dir.to_path_buf(),
            source: err.into(),
        })?;

        // Symlinks to files count as files, subdirectories are left alone
        if !entry.path().is_file() {
            continue;
        }

        if let Some(file) = AssetFile::new(entry.path()) {
            files.push(file);
        }
    }

    Ok(Some(files))
}

/// Markdown documents named by the input paths
#[derive(Debug, Default)]
pub struct DocumentScan {
    /// Sorted, de-duplicated document paths
    pub documents: Vec<PathBuf>,
    /// Warnings for inputs that were ignored
    pub warnings: Vec<ReportItem>,
}

/// Resolve input paths to Markdown documents.
///
/// A directory contributes its immediate `*.md` files; a path ending in `.md`
/// is taken as-is (a missing file surfaces later as a document error);
/// anything else is ignored with a warning.
pub fn find_markdown_files(paths: &[PathBuf]) -> DocumentScan {
    let mut scan = DocumentScan::default();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
                let entry = match entry {
                    Ok(e) => e,
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "cannot read directory entry");
                        continue;
                    }
                };
                if is_markdown(entry.path()) && entry.path().is_file() {
                    scan.documents.push(entry.into_path());
                }
            }
        } else if is_markdown(path) {
            scan.documents.push(path.clone());
        } else {
            tracing::warn!(path = %path.display(), "ignoring path");
            scan.warnings.push(ReportItem::warning(
                normalize_path(path),
                "not a .md file or directory",
            ));
        }
    }

    scan.documents.sort();
    let mut seen = HashSet::new();
    scan.documents.retain(|doc| seen.insert(document_key(doc)));
    scan
}

/// Identity of a document path: canonical when the file exists, otherwise
/// the path without `.` components
fn document_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    })
}
