//! Candidate planning
//!
//! Pure step: given the referenced names, the asset listing and the mode,
//! decide what happens to each unreferenced file. No I/O.

use crate::backends::scan::AssetFile;
use crate::refs::ReferenceSet;

/// How unreferenced files are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Report only, never touch the filesystem
    DryRun,
    /// Delete every candidate (`--yes`)
    Force,
    /// Ask for each file
    #[default]
    Interactive,
}

impl PruneMode {
    /// Mode selected by the `--dry-run` / `--yes` flags
    pub fn from_flags(dry_run: bool, assume_yes: bool) -> Self {
        if dry_run {
            PruneMode::DryRun
        } else if assume_yes {
            PruneMode::Force
        } else {
            PruneMode::Interactive
        }
    }
}

/// What to do with one unreferenced file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Report only
    Report,
    /// Ask the confirmer, delete on approval
    Confirm,
}

/// A planned step for a single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub file: AssetFile,
    pub step: Step,
}

/// Files whose basename is not referenced, sorted by name
pub fn plan_candidates(references: &ReferenceSet, files: &[AssetFile]) -> Vec<AssetFile> {
    let mut candidates: Vec<AssetFile> = files
        .iter()
        .filter(|file| !references.contains(&file.name))
        .cloned()
        .collect();
    candidates.sort();
    candidates
}

/// Plan the steps for every candidate under `mode`
pub fn plan(references: &ReferenceSet, files: &[AssetFile], mode: PruneMode) -> Vec<PlannedStep> {
    let step = match mode {
        PruneMode::DryRun => Step::Report,
        PruneMode::Force | PruneMode::Interactive => Step::Confirm,
    };

    plan_candidates(references, files)
        .into_iter()
        .map(|file| PlannedStep { file, step })
        .collect()
}
