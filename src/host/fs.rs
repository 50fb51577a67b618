//! Asset materialization and best-effort cleanup.

use std::fs;
use std::path::Path;

use serde::Serialize;

use super::error::HostError;

/// Outcome of [`materialize_assets`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Files written to the output tree.
    pub files_copied: usize,
    /// Directories created in the output tree.
    pub dirs_created: usize,
    /// Entries that could not be listed, created, or copied.
    pub failures: usize,
}

impl CopyReport {
    /// Returns true if every entry was copied.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failures == 0
    }
}

/// Copies a bundled resource tree into a writable directory.
///
/// Directories are created as needed, the tree structure is preserved and
/// existing files are overwritten. A failing entry is logged and counted;
/// the rest of the tree is still copied.
#[must_use]
pub fn materialize_assets(src: &Path, out: &Path) -> CopyReport {
    let mut report = CopyReport::default();
    copy_dir(src, out, &mut report);

    tracing::debug!(
        src = %src.display(),
        out = %out.display(),
        files = report.files_copied,
        failures = report.failures,
        "Materialized assets"
    );
    report
}

fn copy_dir(src: &Path, out: &Path, report: &mut CopyReport) {
    let entries = match read_dir(src) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Skipping asset directory: {e}");
            report.failures += 1;
            return;
        }
    };

    if !out.is_dir() {
        if let Err(source) = fs::create_dir_all(out) {
            tracing::warn!("Cannot create '{}': {source}", out.display());
            report.failures += 1;
            return;
        }
        report.dirs_created += 1;
    }

    for entry in entries {
        let target = out.join(entry.file_name());
        let path = entry.path();

        // Follows symlinks: a linked directory is copied as a directory.
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => copy_dir(&path, &target, report),
            Ok(_) => match fs::copy(&path, &target) {
                Ok(_) => report.files_copied += 1,
                Err(e) => {
                    tracing::warn!("Failed to copy '{}': {e}", path.display());
                    report.failures += 1;
                }
            },
            Err(e) => {
                tracing::warn!("Cannot stat '{}': {e}", path.display());
                report.failures += 1;
            }
        }
    }
}

/// Lists a directory, collecting entries so errors surface per directory.
fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>, HostError> {
    let io_err = |source| HostError::Io {
        path: dir.to_path_buf(),
        source,
    };

    fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)
}

/// Deletes a directory and everything below it, ignoring failures.
pub fn delete_recursively(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        tracing::debug!("Could not delete '{}': {e}", dir.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn copies_nested_tree() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(&src.path().join("index.html"), "<html/>");
        write(&src.path().join("js/app.js"), "app");
        write(&src.path().join("js/lib/util.js"), "util");

        let dest = out.path().join("web");
        let report = materialize_assets(src.path(), &dest);

        assert!(report.is_complete());
        assert_eq!(report.files_copied, 3);
        assert_eq!(report.dirs_created, 3);
        assert_eq!(fs::read_to_string(dest.join("index.html")).unwrap(), "<html/>");
        assert_eq!(fs::read_to_string(dest.join("js/lib/util.js")).unwrap(), "util");
    }

    #[test]
    fn overwrites_existing_files() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(&src.path().join("config.json"), "new");
        write(&out.path().join("config.json"), "old and longer");

        let report = materialize_assets(src.path(), out.path());

        assert_eq!(report.files_copied, 1);
        assert_eq!(report.dirs_created, 0);
        assert_eq!(fs::read_to_string(out.path().join("config.json")).unwrap(), "new");
    }

    #[test]
    fn missing_source_is_logged_not_fatal() {
        let out = tempdir().unwrap();

        let report = materialize_assets(&out.path().join("absent"), &out.path().join("dest"));

        assert_eq!(report.files_copied, 0);
        assert_eq!(report.failures, 1);
        assert!(!out.path().join("dest").exists());
    }

    #[test]
    fn unwritable_target_counts_failure_and_continues() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(&src.path().join("a.txt"), "a");
        write(&src.path().join("sub/b.txt"), "b");
        // A file where the `sub` directory should go.
        write(&out.path().join("sub"), "blocker");

        let report = materialize_assets(src.path(), out.path());

        assert_eq!(report.files_copied, 1);
        assert_eq!(report.failures, 1);
        assert_eq!(fs::read_to_string(out.path().join("a.txt")).unwrap(), "a");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_copied_as_directory() {
        let linked = tempdir().unwrap();
        write(&linked.path().join("x.txt"), "x");
        let src = tempdir().unwrap();
        write(&src.path().join("index.html"), "<html/>");
        std::os::unix::fs::symlink(linked.path(), src.path().join("linked")).unwrap();
        let out = tempdir().unwrap();

        let report = materialize_assets(src.path(), out.path());

        assert!(report.is_complete(), "{report:?}");
        assert_eq!(report.files_copied, 2);
        assert_eq!(report.dirs_created, 1);
        assert!(out.path().join("linked").is_dir());
        assert_eq!(fs::read_to_string(out.path().join("linked/x.txt")).unwrap(), "x");
    }

    #[test]
    fn delete_removes_tree() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("cache");
        write(&root.join("a/b/c.txt"), "x");

        delete_recursively(&root);

        assert!(!root.exists());
    }

    #[test]
    fn delete_missing_dir_is_silent() {
        let dir = tempdir().unwrap();
        delete_recursively(&dir.path().join("never-existed"));
    }
}
