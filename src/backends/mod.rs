//! Backends module - File operations
//!
//! Provides:
//! - scan: depth-limited directory listing with walkdir

pub mod scan;
