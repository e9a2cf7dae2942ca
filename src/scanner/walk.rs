use crate::utils::path::relative_key;
use glob::Pattern;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

/// A regular file found under a scan root, not yet hashed.
#[derive(Debug, Clone)]
pub struct WalkedFile {
    pub path: PathBuf,
    pub key: String,
    pub size: u64,
    pub modified: SystemTime,
}

/// Recursively collect the regular files under `root`.
///
/// Entries that cannot be read or stat'ed are logged and skipped; they end up
/// absent from the scan. Symlinks are not followed. Directories matching an
/// ignore pattern are pruned with everything beneath them.
pub fn collect_files(root: &Path, ignore_patterns: &[Pattern]) -> Vec<WalkedFile> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored(root, entry, ignore_patterns));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(key) = relative_key(root, entry.path()) else {
            continue;
        };

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("Error getting metadata for {}: {}", entry.path().display(), err);
                continue;
            }
        };

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(err) => {
                warn!(
                    "Error reading modification time for {}: {}",
                    entry.path().display(),
                    err
                );
                continue;
            }
        };

        files.push(WalkedFile {
            path: entry.into_path(),
            key,
            size: metadata.len(),
            modified,
        });
    }

    files
}

fn is_ignored(root: &Path, entry: &DirEntry, ignore_patterns: &[Pattern]) -> bool {
    if ignore_patterns.is_empty() {
        return false;
    }

    match relative_key(root, entry.path()) {
        Some(key) => {
            let ignored = ignore_patterns.iter().any(|pattern| pattern.matches(&key));
            if ignored {
                trace!("Ignoring {}", key);
            }
            ignored
        }
        // the root itself
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn keys(files: &[WalkedFile]) -> Vec<String> {
        let mut keys: Vec<String> = files.iter().map(|f| f.key.clone()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_collect_files_skips_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/empty")).unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
        fs::write(root.join("sub/inner.txt"), "inner").unwrap();

        let files = collect_files(root, &[]);
        assert_eq!(keys(&files), vec!["sub/inner.txt", "top.txt"]);

        let inner = files.iter().find(|f| f.key == "sub/inner.txt").unwrap();
        assert_eq!(inner.size, 5);
        assert_eq!(inner.path, root.join("sub/inner.txt"));
    }

    #[test]
    fn test_collect_files_prunes_ignored_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/objects/abc"), "blob").unwrap();
        fs::write(root.join("keep.rs"), "fn main() {}").unwrap();
        fs::write(root.join("scratch.tmp"), "tmp").unwrap();

        let patterns = vec![Pattern::new(".git").unwrap(), Pattern::new("*.tmp").unwrap()];
        let files = collect_files(root, &patterns);
        assert_eq!(keys(&files), vec!["keep.rs"]);
    }

    #[test]
    fn test_collect_files_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_files(&temp_dir.path().join("missing"), &[]);
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_symlinks() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("elsewhere.txt"), "elsewhere").unwrap();

        let root = temp_dir.path();
        fs::write(root.join("real.txt"), "real").unwrap();
        symlink(root.join("real.txt"), root.join("link_to_file")).unwrap();
        symlink(outside.path(), root.join("link_to_dir")).unwrap();
        symlink(root.join("missing"), root.join("dangling")).unwrap();

        let files = collect_files(root, &[]);
        assert_eq!(keys(&files), vec!["real.txt"]);
    }
}
