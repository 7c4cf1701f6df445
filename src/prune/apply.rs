//! Single-document pruning
//!
//! Reads the document, extracts references, lists `X.assets/` and carries
//! out the planned steps. Every outcome is emitted as a `ReportItem` as soon
//! as it happens, so interactive prompts follow the document header.

use std::fs;
use std::path::Path;

use crate::backends::scan::{list_asset_files, AssetFile};
use crate::core::error::{PruneError, PruneResult};
use crate::core::file_reader::read_document;
use crate::core::model::{Kind, Meta, ReportError, ReportItem};
use crate::core::paths::{asset_dir_for, normalize_path};
use crate::prune::confirm::{Confirm, Decision};
use crate::prune::plan::{plan, PruneMode, Step};
use crate::refs::extract_references;

/// Result of pruning one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub candidates: usize,
    pub deleted: usize,
    /// The user aborted; later documents should not be processed
    pub aborted: bool,
}

/// Prune the asset directory of one document.
///
/// `confirm` decides every candidate unless `mode` is `DryRun`, which never
/// consults it.
///
/// Errors returned here are document-level (`DocumentNotFound`,
/// `DocumentRead`, `AssetDirectoryRead`); nothing has been deleted when one
/// is returned. Failed deletions are emitted as `Kind::Failed` items instead.
pub fn prune_document(
    document: &Path,
    mode: PruneMode,
    confirm: &mut dyn Confirm,
    emit: &mut dyn FnMut(ReportItem),
) -> PruneResult<DocumentOutcome> {
    let doc_label = normalize_path(document);
    let text = read_document(document)?;
    let references = extract_references(&text);
    let asset_dir = asset_dir_for(document);

    tracing::debug!(
        document = %doc_label,
        references = references.len(),
        asset_dir = %asset_dir.display(),
        "scanned document"
    );

    let listing = list_asset_files(&asset_dir)?;
    let files = listing.as_deref().unwrap_or_default();
    let steps = plan(&references, files, mode);

    emit(ReportItem::document(
        doc_label.clone(),
        Meta {
            asset_dir: Some(normalize_path(&asset_dir)),
            asset_dir_exists: listing.is_some(),
            references: references.iter().cloned().collect(),
            asset_count: files.len(),
            unused_count: steps.len(),
        },
    ));

    let mut outcome = DocumentOutcome {
        candidates: steps.len(),
        ..DocumentOutcome::default()
    };

    for planned in steps {
        let file = &planned.file;
        let label = normalize_path(&file.path);

        let kind = match planned.step {
            Step::Report => Kind::WouldDelete,
            Step::Confirm if outcome.aborted => Kind::Kept,
            Step::Confirm => match confirm.confirm(&file.path) {
                Ok(Decision::Delete) => Kind::Deleted,
                Ok(Decision::Skip) => Kind::Kept,
                Ok(Decision::Abort) => {
                    tracing::debug!(document = %doc_label, "aborted by user");
                    outcome.aborted = true;
                    Kind::Kept
                }
                Err(err) => {
                    let err = PruneError::Prompt(err);
                    tracing::warn!(error = %err, "treating prompt failure as abort");
                    outcome.aborted = true;
                    emit(ReportItem::action(Kind::Kept, doc_label.clone(), label)
                        .with_error(ReportError::from(&err)));
                    continue;
                }
            },
        };

        if kind != Kind::Deleted {
            emit(ReportItem::action(kind, doc_label.clone(), label));
            continue;
        }

        match delete_asset(file) {
            Ok(()) => {
                outcome.deleted += 1;
                emit(ReportItem::action(Kind::Deleted, doc_label.clone(), label));
            }
            Err(err) => {
                tracing::warn!(error = %err, "deletion failed");
                emit(ReportItem::action(Kind::Failed, doc_label.clone(), label)
                    .with_error(ReportError::from(&err)));
            }
        }
    }

    Ok(outcome)
}

fn delete_asset(file: &AssetFile) -> PruneResult<()> {
    tracing::debug!(path = %file.path.display(), "deleting");
    fs::remove_file(&file.path).map_err(|source| PruneError::DeletionFailed {
        path: file.path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paths::file_name_string;
    use crate::prune::confirm::{AssumeYes, TerminalPrompt};
    use std::fs::File;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::tempdir;

    /// Confirm impl that fails the test if it is ever asked
    struct NeverAsked;

    impl Confirm for NeverAsked {
        fn confirm(&mut self, path: &Path) -> std::io::Result<Decision> {
            panic!("unexpected prompt for {}", path.display());
        }
    }

    /// Confirm impl that approves everything and counts the requests
    #[derive(Default)]
    struct Counting {
        asked: Vec<PathBuf>,
    }

    impl Confirm for Counting {
        fn confirm(&mut self, path: &Path) -> std::io::Result<Decision> {
            self.asked.push(path.to_path_buf());
            Ok(Decision::Delete)
        }
    }

    fn setup(doc: &str, assets: &[&str]) -> (tempfile::TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let md = temp.path().join("test.md");
        fs::write(&md, doc).unwrap();
        if !assets.is_empty() {
            let dir = temp.path().join("test.assets");
            fs::create_dir(&dir).unwrap();
            for name in assets {
                File::create(dir.join(name)).unwrap();
            }
        }
        (temp, md)
    }

    fn run(md: &Path, mode: PruneMode, confirm: &mut dyn Confirm) -> (DocumentOutcome, Vec<ReportItem>) {
        let mut items = Vec::new();
        let outcome = prune_document(md, mode, confirm, &mut |item| items.push(item)).unwrap();
        (outcome, items)
    }

    fn paths_of(items: &[ReportItem], kind: Kind) -> Vec<String> {
        items
            .iter()
            .filter(|i| i.kind == kind)
            .filter_map(|i| i.path.clone())
            .collect()
    }

    const DOC: &str = "![alt](test.assets/a.png)\n<img src=\"test.assets/b.jpg\">\n";

    #[test]
    fn test_dry_run_reports_without_mutation() {
        let (temp, md) = setup(DOC, &["a.png", "b.jpg", "c.gif"]);
        let (outcome, items) = run(&md, PruneMode::DryRun, &mut NeverAsked);

        let reported = paths_of(&items, Kind::WouldDelete);
        assert_eq!(reported.len(), 1);
        assert!(reported[0].ends_with("test.assets/c.gif"));
        assert_eq!(outcome.candidates, 1);
        assert_eq!(outcome.deleted, 0);
        for name in ["a.png", "b.jpg", "c.gif"] {
            assert!(temp.path().join("test.assets").join(name).exists());
        }
    }

    #[test]
    fn test_force_deletes_and_is_idempotent() {
        let (temp, md) = setup(DOC, &["a.png", "b.jpg", "c.gif", "d.svg"]);
        let (outcome, items) = run(&md, PruneMode::Force, &mut AssumeYes);
        assert_eq!(outcome.deleted, 2);
        assert_eq!(paths_of(&items, Kind::Deleted).len(), 2);
        assert!(!temp.path().join("test.assets/c.gif").exists());
        assert!(temp.path().join("test.assets/a.png").exists());

        let (second, items) = run(&md, PruneMode::Force, &mut AssumeYes);
        assert_eq!(second.candidates, 0);
        assert!(paths_of(&items, Kind::Deleted).is_empty());
    }

    #[test]
    fn test_missing_asset_dir_is_not_an_error() {
        let (_temp, md) = setup(DOC, &[]);
        let (outcome, items) = run(&md, PruneMode::Force, &mut AssumeYes);
        assert_eq!(outcome.candidates, 0);
        assert_eq!(items.len(), 1);
        let meta = items[0].meta.as_ref().unwrap();
        assert!(!meta.asset_dir_exists);
        assert!(meta.asset_dir.as_ref().unwrap().ends_with("test.assets"));
    }

    #[test]
    fn test_missing_document_fails_before_listing() {
        let temp = tempdir().unwrap();
        let md = temp.path().join("gone.md");
        let mut items = Vec::new();
        let err = prune_document(&md, PruneMode::Force, &mut AssumeYes, &mut |i| items.push(i))
            .unwrap_err();
        assert!(matches!(err, PruneError::DocumentNotFound { .. }));
        assert!(items.is_empty());
    }

    #[test]
    fn test_basename_matching_across_directories() {
        let (temp, md) = setup("![x](./sub/img.png)", &["img.png"]);
        let (outcome, _) = run(&md, PruneMode::Force, &mut AssumeYes);
        assert_eq!(outcome.candidates, 0);
        assert!(temp.path().join("test.assets/img.png").exists());
    }

    #[test]
    fn test_all_three_syntaxes_protect_files() {
        let doc = "![](one.png)\n<img src=\"two.png\">\n[ref]: three.png\n";
        let (_temp, md) = setup(doc, &["one.png", "two.png", "three.png"]);
        let (outcome, _) = run(&md, PruneMode::DryRun, &mut NeverAsked);
        assert_eq!(outcome.candidates, 0);
    }

    #[test]
    fn test_force_asks_confirmer_for_each_candidate() {
        let (temp, md) = setup(DOC, &["a.png", "c.gif", "d.svg"]);
        let mut confirmer = Counting::default();
        let (outcome, _) = run(&md, PruneMode::Force, &mut confirmer);

        assert_eq!(outcome.deleted, 2);
        let asked: Vec<String> = confirmer
            .asked
            .iter()
            .filter_map(|p| file_name_string(p))
            .collect();
        assert_eq!(asked, vec!["c.gif", "d.svg"]);
        assert!(temp.path().join("test.assets/a.png").exists());
    }

    #[test]
    fn test_hash_in_referenced_name_is_not_deleted() {
        let (temp, md) = setup("![x](test.assets/C#-notes.png)\n", &["C#-notes.png", "C", "old.png"]);
        let (outcome, items) = run(&md, PruneMode::Force, &mut AssumeYes);

        assert!(temp.path().join("test.assets/C#-notes.png").exists());
        let deleted = paths_of(&items, Kind::Deleted);
        assert!(deleted.iter().all(|p| !p.ends_with("C#-notes.png")));
        assert_eq!(outcome.deleted, 1);
        assert!(!temp.path().join("test.assets/old.png").exists());
    }

    #[test]
    fn test_subdirectories_are_untouched() {
        let (temp, md) = setup("no images", &["loose.png"]);
        let nested = temp.path().join("test.assets/nested");
        fs::create_dir(&nested).unwrap();
        File::create(nested.join("inner.png")).unwrap();

        let (outcome, _) = run(&md, PruneMode::Force, &mut AssumeYes);
        assert_eq!(outcome.deleted, 1);
        assert!(nested.join("inner.png").exists());
    }

    #[test]
    fn test_interactive_answers() {
        let (temp, md) = setup("nothing referenced", &["a.png", "b.png", "c.png"]);
        let mut prompt = TerminalPrompt::new(Cursor::new(b"y\nn\na\n".to_vec()), Vec::new());
        let (outcome, items) = run(&md, PruneMode::Interactive, &mut prompt);

        assert_eq!(outcome.deleted, 1);
        assert!(outcome.aborted);
        assert!(!temp.path().join("test.assets/a.png").exists());
        assert!(temp.path().join("test.assets/b.png").exists());
        assert!(temp.path().join("test.assets/c.png").exists());
        assert_eq!(paths_of(&items, Kind::Kept).len(), 2);
    }

    #[test]
    fn test_abort_keeps_remaining_without_prompting() {
        let (temp, md) = setup("", &["a.png", "b.png", "c.png"]);
        let mut prompt = TerminalPrompt::new(Cursor::new(b"a\n".to_vec()), Vec::new());
        let (outcome, items) = run(&md, PruneMode::Interactive, &mut prompt);

        assert!(outcome.aborted);
        assert_eq!(outcome.deleted, 0);
        assert_eq!(paths_of(&items, Kind::Kept).len(), 3);
        assert_eq!(fs::read_dir(temp.path().join("test.assets")).unwrap().count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_deletion_continues() {
        use std::os::unix::fs::PermissionsExt;

        let (temp, md) = setup("", &["a.png", "b.png"]);
        let dir = temp.path().join("test.assets");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory permissions; nothing to observe then
        let probe = dir.join(".probe");
        if File::create(&probe).is_ok() {
            fs::remove_file(&probe).unwrap();
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let (outcome, items) = run(&md, PruneMode::Force, &mut AssumeYes);
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(outcome.deleted, 0);
        let failed: Vec<_> = items.iter().filter(|i| i.kind == Kind::Failed).collect();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].errors[0].code, "DELETION_FAILED");
    }
}
