//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Resolve a request URL to a file under the distribution root.
///
/// Directories resolve to their `index.html`. Traversal is rejected twice:
/// a literal `..` check before touching the filesystem, and a canonical
/// prefix check afterwards to catch symlink escapes.
pub(super) fn resolve_path(url: &str, dist_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    if clean.contains("..") {
        return None;
    }

    let local = dist_root.join(&clean);

    let canonical = local.canonicalize().ok()?;
    let root_canonical = dist_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Percent-decode, strip the query string and trim slashes.
fn normalize_url(url: &str) -> String {
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn dist() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("css/index.min.css"), "body{}").unwrap();
        dir
    }

    #[test]
    fn test_root_serves_index() {
        let dist = dist();
        let resolved = resolve_path("/", dist.path()).unwrap();
        assert!(resolved.ends_with("index.html"));
    }

    #[test]
    fn test_file_lookup() {
        let dist = dist();
        let resolved = resolve_path("/css/index.min.css", dist.path()).unwrap();
        assert!(resolved.ends_with("css/index.min.css"));
    }

    #[test]
    fn test_query_string_stripped() {
        // Cache-busted stylesheet refetch from the reload client
        let dist = dist();
        assert!(resolve_path("/css/index.min.css?t=1724659200", dist.path()).is_some());
    }

    #[test]
    fn test_traversal_rejected() {
        let dist = dist();
        assert!(resolve_path("/../secret", dist.path()).is_none());
        // Encoded dots decode to ".." before the check
        assert!(resolve_path("/%2e%2e/secret", dist.path()).is_none());
    }

    #[test]
    fn test_missing_file() {
        let dist = dist();
        assert!(resolve_path("/nope.html", dist.path()).is_none());
    }
}
