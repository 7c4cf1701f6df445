//! Batch flow - prune every document named on the command line
//!
//! Steps:
//! 1. Resolve inputs to Markdown documents (directories are not recursed)
//! 2. Prune each document independently; a failing document is reported
//!    and the next one is processed
//! 3. Stop early only when the user aborts an interactive run

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::backends::scan::find_markdown_files;
use crate::core::model::{ReportError, ReportItem, ReportSet};
use crate::core::paths::normalize_path;
use crate::core::render::{RenderConfig, Renderer};
use crate::prune::{prune_document, AssumeYes, Confirm, PruneMode, TerminalPrompt};

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub report: ReportSet,
    /// Number of documents found in the inputs
    pub documents_found: usize,
}

/// Prune all documents, forwarding every item to `emit` as it is produced
pub fn prune_all(
    paths: &[PathBuf],
    mode: PruneMode,
    confirm: &mut dyn Confirm,
    emit: &mut dyn FnMut(&ReportItem),
) -> BatchReport {
    let scan = find_markdown_files(paths);
    let mut report = ReportSet::new();
    report.dry_run = mode == PruneMode::DryRun;

    for warning in scan.warnings {
        emit(&warning);
        report.push(warning);
    }

    tracing::debug!(documents = scan.documents.len(), "resolved inputs");

    for document in &scan.documents {
        let result = prune_document(document, mode, confirm, &mut |item| {
            emit(&item);
            report.push(item);
        });

        match result {
            Ok(outcome) => {
                tracing::debug!(
                    document = %document.display(),
                    candidates = outcome.candidates,
                    deleted = outcome.deleted,
                    "document done"
                );
                if outcome.aborted {
                    report.aborted = true;
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(document = %document.display(), error = %err, "skipping document");
                let item = ReportItem::error(normalize_path(document), ReportError::from(&err));
                emit(&item);
                report.push(item);
            }
        }
    }

    BatchReport {
        report,
        documents_found: scan.documents.len(),
    }
}

/// Run the prune command and render its report
pub fn run_prune(paths: &[PathBuf], mode: PruneMode, config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(config);
    let mut emit = |item: &ReportItem| renderer.emit_item(item);

    let batch = match mode {
        PruneMode::Interactive => {
            let mut prompt = TerminalPrompt::stdio();
            prune_all(paths, mode, &mut prompt, &mut emit)
        }
        // Dry runs never reach the confirmer
        PruneMode::Force | PruneMode::DryRun => prune_all(paths, mode, &mut AssumeYes, &mut emit),
    };

    if batch.documents_found == 0 {
        bail!("no markdown files found to process");
    }

    renderer.emit_final(&batch.report);

    if batch.report.has_document_errors() {
        bail!(
            "{} of {} document(s) could not be processed",
            batch.report.summary().document_errors,
            batch.documents_found
        );
    }

    Ok(())
}
