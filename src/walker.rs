use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walkdir::WalkDir;

use crate::error::ScanError;

/// Capacity of the hand-off channel between the walker and the classifier.
pub const CHANNEL_CAPACITY: usize = 64;

/// Suffixes left behind by templating tools; such files are never reported.
const BACKUP_SUFFIXES: &[&str] = &[".after", ".before"];

/// Whether a file name looks like a license file worth classifying.
pub fn is_license_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    if BACKUP_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return false;
    }
    lower.contains("license") || lower.contains("licence")
}

/// Start a recursive walk of `root` on a blocking thread.
///
/// Candidate paths arrive on the returned receiver in directory-entry order.
/// The channel closes when the walk ends; the join handle then reports
/// whether it ended cleanly. The first traversal error stops the walk.
pub fn spawn_walk(
    root: &Path,
) -> (mpsc::Receiver<PathBuf>, JoinHandle<Result<(), ScanError>>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let root = root.to_path_buf();

    let handle = tokio::task::spawn_blocking(move || {
        walk(&root, |path| tx.blocking_send(path).is_ok())
    });

    (rx, handle)
}

/// Walk `root` synchronously, handing each candidate to `emit`.
/// `emit` returns `false` when the receiver is gone, which ends the walk early.
pub fn walk<F>(root: &Path, mut emit: F) -> Result<(), ScanError>
where
    F: FnMut(PathBuf) -> bool,
{
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        // Links are not followed, but a link to a file counts as that file.
        // A dangling link fails the walk.
        let is_file = if entry.path_is_symlink() {
            std::fs::metadata(entry.path())
                .map_err(|source| ScanError::Symlink {
                    path: entry.path().to_path_buf(),
                    source,
                })?
                .is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_license_file_name(&name) {
            continue;
        }

        tracing::debug!(path = %entry.path().display(), "found license file");
        if !emit(entry.into_path()) {
            tracing::debug!("receiver dropped, stopping walk");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_license_names() {
        assert!(is_license_file_name("LICENSE"));
        assert!(is_license_file_name("LICENSE-MIT"));
        assert!(is_license_file_name("license.txt"));
        assert!(is_license_file_name("Licence.md"));
        assert!(is_license_file_name("UNLICENSE"));
    }

    #[test]
    fn test_other_names() {
        assert!(!is_license_file_name("README.md"));
        assert!(!is_license_file_name("COPYING"));
        assert!(!is_license_file_name("Cargo.toml"));
    }

    #[test]
    fn test_backup_suffixes_skipped() {
        assert!(!is_license_file_name("LICENSE.before"));
        assert!(!is_license_file_name("LICENCE.after"));
        assert!(!is_license_file_name("license.BEFORE"));
        assert!(is_license_file_name("LICENSE.before.txt"));
    }

    #[test]
    fn test_walk_finds_nested_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/LICENSE"), "x").unwrap();
        fs::write(dir.path().join("a/b/licence.txt"), "x").unwrap();
        fs::write(dir.path().join("a/b/README"), "x").unwrap();
        fs::write(dir.path().join("a/LICENSE.after"), "x").unwrap();

        let mut found = Vec::new();
        walk(dir.path(), |p| {
            found.push(p);
            true
        })
        .unwrap();
        found.sort();

        assert_eq!(
            found,
            vec![dir.path().join("a/LICENSE"), dir.path().join("a/b/licence.txt")]
        );
    }

    #[test]
    fn test_walk_skips_license_named_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("licenses")).unwrap();
        fs::write(dir.path().join("licenses/MIT.txt"), "x").unwrap();

        let mut found = Vec::new();
        walk(dir.path(), |p| {
            found.push(p);
            true
        })
        .unwrap();

        assert!(found.is_empty());
    }

    #[test]
    fn test_walk_missing_root_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = walk(&missing, |_| true).unwrap_err();
        assert!(matches!(err, ScanError::Walk { .. }));
    }

    #[test]
    fn test_walk_stops_when_emit_refuses() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("LICENSE-A"), "x").unwrap();
        fs::write(dir.path().join("LICENSE-B"), "x").unwrap();

        let mut calls = 0;
        walk(dir.path(), |_| {
            calls += 1;
            false
        })
        .unwrap();

        assert_eq!(calls, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_symlinked_file() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("a/LICENSE"), "x").unwrap();
        symlink(dir.path().join("a/LICENSE"), dir.path().join("a/LICENSE-link")).unwrap();

        let mut found = Vec::new();
        walk(dir.path(), |p| {
            found.push(p);
            true
        })
        .unwrap();
        found.sort();

        assert_eq!(
            found,
            vec![dir.path().join("a/LICENSE"), dir.path().join("a/LICENSE-link")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinked_directory() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("real")).unwrap();
        symlink(dir.path().join("real"), dir.path().join("license-dir")).unwrap();

        let mut found = Vec::new();
        walk(dir.path(), |p| {
            found.push(p);
            true
        })
        .unwrap();

        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_dangling_symlink_fails() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        symlink(dir.path().join("nowhere"), dir.path().join("a/LICENSE-broken")).unwrap();

        let err = walk(dir.path(), |_| true).unwrap_err();
        assert!(
            matches!(err, ScanError::Symlink { ref path, .. } if path.ends_with("a/LICENSE-broken"))
        );
    }

    #[tokio::test]
    async fn test_spawn_walk_streams_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/LICENSE"), "x").unwrap();

        let (mut rx, handle) = spawn_walk(dir.path());
        let mut found = Vec::new();
        while let Some(path) = rx.recv().await {
            found.push(path);
        }
        handle.await.unwrap().unwrap();

        assert_eq!(found, vec![dir.path().join("pkg/LICENSE")]);
    }
}
