//! Filesystem helpers for source collection.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

/// Collect files under `dir` (recursively) whose extension matches one of
/// `extensions`, sorted lexicographically by full path.
///
/// Sorting guarantees deterministic concatenation order regardless of the
/// platform's directory enumeration order.
pub fn collect_sorted(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .skip_hidden(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| {
                    extensions.iter().any(|want| ext.eq_ignore_ascii_case(want))
                })
        })
        .collect();

    files.sort();
    files
}

/// Relative path of `path` under `base`, falling back to the file name.
///
/// Used to mirror source subdirectories into the output directory.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| PathBuf::from(path.file_name().unwrap_or_default()))
}
