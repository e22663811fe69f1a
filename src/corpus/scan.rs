//! Corpus scanning
//!
//! Uses the ignore crate for directory traversal. By default only the files
//! directly inside the corpus root are collected, like a plain directory
//! listing: dotfiles included, ignore files not consulted. Deeper walks and
//! filtering are opt-in.
//!
//! Entries the walk cannot visit (unreadable directories, dangling symlinks)
//! are returned as failures next to the documents, so the caller decides
//! whether they halt the run.

use anyhow::Result;
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::CorpusError;
use crate::core::model::{ItemError, Meta, ResultItem, ResultSet};
use crate::core::paths::{display_path, has_extension, make_relative};
use crate::core::render::{RenderConfig, Renderer};

/// Which files under the root belong to the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum depth from the root, `None` walks everything
    pub max_depth: Option<usize>,
    /// Include hidden files and directories
    pub hidden: bool,
    /// Respect .gitignore/.ignore rules
    pub ignore: bool,
    /// Only keep files with one of these extensions
    pub extensions: Option<Vec<String>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(1),
            hidden: true,
            ignore: false,
            extensions: None,
        }
    }
}

/// A file selected for the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the root, '/' separated
    pub relative: String,
    /// Size in bytes at scan time
    pub size: Option<u64>,
}

/// An entry the walk could not visit
#[derive(Debug)]
pub struct ScanFailure {
    /// Path relative to the root, '/' separated
    pub relative: String,
    pub error: CorpusError,
}

impl ScanFailure {
    pub fn to_result_item(&self) -> ResultItem {
        ResultItem::error(ItemError::new(self.error.code(), self.error.to_string()))
            .with_path(&self.relative)
    }
}

/// Everything a scan found, both sorted by relative path
#[derive(Debug, Default)]
pub struct CorpusScan {
    pub documents: Vec<DocumentEntry>,
    pub failures: Vec<ScanFailure>,
}

/// Walk `root` and collect its corpus files
pub fn scan_documents(
    root: &Path,
    options: &ScanOptions,
) -> std::result::Result<CorpusScan, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!options.hidden)
        .ignore(options.ignore)
        .parents(options.ignore)
        .git_ignore(options.ignore)
        .git_global(options.ignore)
        .git_exclude(options.ignore)
        .max_depth(options.max_depth);

    let mut scan = CorpusScan::default();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let failure = walk_failure(root, err);
                log::warn!("cannot visit {}: {}", failure.relative, failure.error);
                scan.failures.push(failure);
                continue;
            }
        };

        let path = entry.path();
        if entry.depth() == 0 {
            continue;
        }

        if let Some(exts) = &options.extensions {
            if !has_extension(path, exts) {
                continue;
            }
        }

        if !path.is_file() {
            if entry.path_is_symlink() {
                if let Err(source) = fs::metadata(path) {
                    let failure = ScanFailure {
                        relative: display_path(path, root),
                        error: CorpusError::Unreadable {
                            path: path.to_path_buf(),
                            source,
                        },
                    };
                    log::warn!("dangling symlink {}", failure.relative);
                    scan.failures.push(failure);
                }
            }
            continue;
        }

        let relative = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };

        let size = entry.metadata().ok().map(|m| m.len());
        scan.documents.push(DocumentEntry {
            path: path.to_path_buf(),
            relative,
            size,
        });
    }

    scan.documents.sort_by(|a, b| a.relative.cmp(&b.relative));
    scan.failures.sort_by(|a, b| a.relative.cmp(&b.relative));
    log::debug!(
        "scan of {} found {} documents, {} failures",
        root.display(),
        scan.documents.len(),
        scan.failures.len()
    );
    Ok(scan)
}

/// Innermost path an ignore error refers to
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn walk_failure(root: &Path, err: ignore::Error) -> ScanFailure {
    let path = error_path(&err).unwrap_or(root).to_path_buf();
    let relative = match display_path(&path, root) {
        r if r.is_empty() => ".".to_string(),
        r => r,
    };
    ScanFailure {
        relative,
        error: CorpusError::Unreadable {
            path,
            source: io::Error::new(io::ErrorKind::Other, err.to_string()),
        },
    }
}

/// Run the scan command
///
/// Entries that could not be visited are listed as error items before the
/// documents.
pub fn run_scan(root: &Path, options: &ScanOptions, config: RenderConfig) -> Result<()> {
    let scan = scan_documents(root, options)?;

    let mut result_set: ResultSet = scan.failures.iter().map(ScanFailure::to_result_item).collect();
    result_set.extend(
        scan.documents
            .into_iter()
            .map(|entry| ResultItem::document(entry.relative).with_meta(Meta { size: entry.size })),
    );

    let renderer = Renderer::with_config(config);
    renderer.render_to(&result_set, std::io::stdout().lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn documents(root: &Path, options: &ScanOptions) -> Vec<DocumentEntry> {
        let scan = scan_documents(root, options).unwrap();
        assert!(scan.failures.is_empty(), "unexpected failures: {:?}", scan.failures);
        scan.documents
    }

    fn relatives(entries: &[DocumentEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.relative.as_str()).collect()
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp = tempdir().unwrap();
        let entries = documents(temp.path(), &ScanOptions::default());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_scan_top_level_only_by_default() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/c.txt"), "c").unwrap();

        let entries = documents(temp.path(), &ScanOptions::default());
        assert_eq!(relatives(&entries), vec!["a.txt", "b.txt"]);
        assert_eq!(entries[0].size, Some(1));
    }

    #[test]
    fn test_scan_recursive() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir_all(temp.path().join("nested/deeper")).unwrap();
        fs::write(temp.path().join("nested/c.txt"), "c").unwrap();
        fs::write(temp.path().join("nested/deeper/d.txt"), "d").unwrap();

        let options = ScanOptions {
            max_depth: None,
            ..ScanOptions::default()
        };
        let entries = documents(temp.path(), &options);
        assert_eq!(
            relatives(&entries),
            vec!["a.txt", "nested/c.txt", "nested/deeper/d.txt"]
        );

        let options = ScanOptions {
            max_depth: Some(2),
            ..ScanOptions::default()
        };
        let entries = documents(temp.path(), &options);
        assert_eq!(relatives(&entries), vec!["a.txt", "nested/c.txt"]);
    }

    #[test]
    fn test_scan_extension_filter() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.md"), "b").unwrap();
        fs::write(temp.path().join("c.bin"), "c").unwrap();

        let options = ScanOptions {
            extensions: Some(vec!["txt".to_string(), "md".to_string()]),
            ..ScanOptions::default()
        };
        let entries = documents(temp.path(), &options);
        assert_eq!(relatives(&entries), vec!["a.txt", "b.md"]);
    }

    #[test]
    fn test_scan_hidden_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".hidden.txt"), "h").unwrap();
        fs::write(temp.path().join("shown.txt"), "s").unwrap();

        let entries = documents(temp.path(), &ScanOptions::default());
        assert_eq!(relatives(&entries), vec![".hidden.txt", "shown.txt"]);

        let options = ScanOptions {
            hidden: false,
            ..ScanOptions::default()
        };
        let entries = documents(temp.path(), &options);
        assert_eq!(relatives(&entries), vec!["shown.txt"]);
    }

    #[test]
    fn test_scan_ignore_files_only_when_asked() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".ignore"), "*.txt\n").unwrap();
        fs::write(temp.path().join("a.txt"), "hello hello").unwrap();
        fs::write(temp.path().join(".notes"), "n").unwrap();

        let entries = documents(temp.path(), &ScanOptions::default());
        assert_eq!(relatives(&entries), vec![".ignore", ".notes", "a.txt"]);

        let options = ScanOptions {
            ignore: true,
            ..ScanOptions::default()
        };
        let entries = documents(temp.path(), &options);
        assert_eq!(relatives(&entries), vec![".ignore", ".notes"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_reports_dangling_symlink() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing.txt"), temp.path().join("b.txt"))
            .unwrap();

        let scan = scan_documents(temp.path(), &ScanOptions::default()).unwrap();
        assert_eq!(relatives(&scan.documents), vec!["a.txt"]);
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].relative, "b.txt");
        assert_eq!(scan.failures[0].error.code(), "FILE_UNREADABLE");

        let item = scan.failures[0].to_result_item();
        assert_eq!(item.path.as_deref(), Some("b.txt"));
        assert_eq!(item.errors[0].code, "FILE_UNREADABLE");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_symlink_to_file_is_a_document() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();
        std::os::unix::fs::symlink(temp.path().join("a.txt"), temp.path().join("b.txt")).unwrap();

        let entries = documents(temp.path(), &ScanOptions::default());
        assert_eq!(relatives(&entries), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_not_a_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let err = scan_documents(&file, &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, CorpusError::NotADirectory(_)));

        let err = scan_documents(&temp.path().join("missing"), &ScanOptions::default()).unwrap_err();
        assert_eq!(err.code(), "NOT_A_DIRECTORY");
    }
}
