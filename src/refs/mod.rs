//! Reference extraction module
//!
//! Turns document text into the set of asset file names it references:
//! - Markdown images `![alt](path)`
//! - HTML `<img src="...">` tags
//! - Reference-style definitions `[id]: path`
//! - Bare `X.assets/name)` paths

pub mod extract;
pub mod normalize;

pub use extract::{extract_references, ReferenceSet};
