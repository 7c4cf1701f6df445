//! Flows module - Operations spanning several documents
//!
//! Provides:
//! - batch: run the pruner over every document named on the command line

pub mod batch;
