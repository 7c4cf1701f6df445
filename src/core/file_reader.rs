//! Document reading
//!
//! Documents must be valid UTF-8. Unlike a lossy read, a decode failure is
//! reported as an error so that no asset is deleted on the strength of a
//! misread document.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::{PruneError, PruneResult};

/// Byte-order mark some editors prepend to UTF-8 files
const UTF8_BOM: char = '\u{feff}';

/// Read a Markdown document as UTF-8 text
pub fn read_document(path: &Path) -> PruneResult<String> {
    match fs::read_to_string(path) {
        Ok(mut content) => {
            if content.starts_with(UTF8_BOM) {
                content.remove(0);
            }
            Ok(content)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Err(PruneError::DocumentNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(PruneError::DocumentRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
