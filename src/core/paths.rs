//! Path utilities
//!
//! Displayed paths always use '/' as separator. The asset directory of a
//! document `X.md` is the sibling `X.assets`.

use std::path::{Path, PathBuf};

/// Suffix appended to a document stem to name its asset directory
pub const ASSET_DIR_SUFFIX: &str = ".assets";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Derive the asset directory for a document: `dir/X.md` -> `dir/X.assets`
pub fn asset_dir_for(document: &Path) -> PathBuf {
    let mut name = document
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(ASSET_DIR_SUFFIX);
    document.with_file_name(name)
}

/// Check if a path names a Markdown document (`.md`, any case)
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// File name of a path as an owned string (lossy)
pub fn file_name_string(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
