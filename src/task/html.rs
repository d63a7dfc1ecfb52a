//! HTML task: resolve `@@include` directives and write the merged document.
//!
//! The entry document may reference partials with `@@include('header.html')`;
//! targets are resolved relative to the *including* file and expanded
//! recursively, so partials may include further partials.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;

use super::{TaskKind, TaskReport};
use crate::config::SiteConfig;

/// Matches `@@include('path')` / `@@include("path")`.
static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@@include\(\s*['"]([^'"]+)['"]\s*\)"#).expect("include regex is valid")
});

/// Merge the entry document and write it to the distribution root.
pub fn run(config: &SiteConfig) -> Result<TaskReport> {
    let entry = config.html_entry();
    let mut stack = Vec::new();
    let merged = expand_file(&entry, &mut stack)?;

    let dist = config.dist_dir();
    fs::create_dir_all(&dist)
        .with_context(|| format!("failed to create {}", dist.display()))?;

    let file_name = entry
        .file_name()
        .context("html entry has no file name")?;
    let output = dist.join(file_name);
    fs::write(&output, merged)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(TaskReport::new(TaskKind::Html, vec![output]))
}

/// Read a document and expand its include directives recursively.
///
/// `stack` holds the chain of files currently being expanded; revisiting
/// one of them means the includes form a cycle.
fn expand_file(path: &Path, stack: &mut Vec<PathBuf>) -> Result<String> {
    let path = path
        .canonicalize()
        .with_context(|| format!("include target not found: {}", path.display()))?;

    if stack.contains(&path) {
        bail!(
            "include cycle detected: {} includes itself (chain: {})",
            path.display(),
            stack
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // Targets resolve relative to the including file
    let base = path.parent().unwrap_or(Path::new("."));

    stack.push(path.clone());
    let expanded = expand_content(&content, base, stack);
    stack.pop();
    expanded
}

/// Replace every include directive in `content` with its expansion.
fn expand_content(content: &str, base: &Path, stack: &mut Vec<PathBuf>) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut last_end = 0;

    for caps in INCLUDE_RE.captures_iter(content) {
        let whole = caps.get(0).expect("capture 0 always present");
        let target = &caps[1];

        result.push_str(&content[last_end..whole.start()]);
        result.push_str(&expand_file(&base.join(target), stack)?);
        last_end = whole.end();
    }

    result.push_str(&content[last_end..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_include_inlined_at_position() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("src/app");
        fs::create_dir_all(&app).unwrap();
        fs::write(
            app.join("index.html"),
            "<body>@@include('header.html')<main></main></body>",
        )
        .unwrap();
        fs::write(app.join("header.html"), "<h1>Hi</h1>").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        let output = fs::read_to_string(&report.outputs[0]).unwrap();
        assert_eq!(output, "<body><h1>Hi</h1><main></main></body>");
    }

    #[test]
    fn test_nested_includes_relative_to_including_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("src/app");
        fs::create_dir_all(app.join("partials")).unwrap();
        fs::write(app.join("index.html"), "@@include('partials/nav.html')").unwrap();
        // nav.html includes a sibling inside partials/, not under src/app/
        fs::write(app.join("partials/nav.html"), "<nav>@@include(\"item.html\")</nav>").unwrap();
        fs::write(app.join("partials/item.html"), "<li>Home</li>").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        let output = fs::read_to_string(&report.outputs[0]).unwrap();
        assert_eq!(output, "<nav><li>Home</li></nav>");
    }

    #[test]
    fn test_missing_include_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("src/app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("index.html"), "@@include('nope.html')").unwrap();

        let err = run(&config_at(dir.path())).unwrap_err();
        assert!(err.to_string().contains("nope.html"));
    }

    #[test]
    fn test_include_cycle_detected() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("src/app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("index.html"), "@@include('a.html')").unwrap();
        fs::write(app.join("a.html"), "@@include('b.html')").unwrap();
        fs::write(app.join("b.html"), "@@include('a.html')").unwrap();

        let err = run(&config_at(dir.path())).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_no_directives_passthrough() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("src/app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("index.html"), "<p>plain</p>").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        let output = fs::read_to_string(&report.outputs[0]).unwrap();
        assert_eq!(output, "<p>plain</p>");
    }

    #[test]
    fn test_directive_regex() {
        let caps = INCLUDE_RE.captures("@@include( 'a/b.html' )").unwrap();
        assert_eq!(&caps[1], "a/b.html");
        assert!(INCLUDE_RE.captures("@include('a.html')").is_none());
    }
}
