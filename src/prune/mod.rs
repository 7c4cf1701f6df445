//! Asset pruning module
//!
//! - plan: set difference between asset listing and references (pure)
//! - confirm: per-file decision capability (terminal prompt or `--yes`)
//! - apply: carries out the plan for one document

pub mod apply;
pub mod confirm;
pub mod plan;

pub use apply::prune_document;
pub use confirm::{AssumeYes, Confirm, TerminalPrompt};
pub use plan::PruneMode;
