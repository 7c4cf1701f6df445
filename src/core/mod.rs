//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Report model (ReportItem, ReportSet)
//! - Typed errors for document processing
//! - Rendering functions for different output formats
//! - Path utilities and the `X.md` -> `X.assets` mapping
//! - Strict UTF-8 document reading

pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
