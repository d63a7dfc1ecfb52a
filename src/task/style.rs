//! Style task: concatenate SCSS sources, compile, minify.
//!
//! Sources are concatenated in lexicographic path order so the cascade is
//! deterministic across platforms, then compiled as one unit with the
//! styles directory on the load path (`@use`/`@import` still resolve).

use std::fs;

use anyhow::{Context, Result, anyhow};

use super::{TaskKind, TaskReport, minify_css};
use crate::config::SiteConfig;
use crate::utils;

/// Output file name: one logical unit, minified marker in the name.
pub const OUTPUT_NAME: &str = "index.min.css";

/// Compile all style sources into `dist/css/index.min.css`.
///
/// An empty source set is not an error; the task simply produces nothing.
pub fn run(config: &SiteConfig) -> Result<TaskReport> {
    let styles_dir = config.styles_dir();
    let sources = utils::fs::collect_sorted(&styles_dir, &["scss"]);
    if sources.is_empty() {
        crate::debug!("style"; "no scss sources under {}", styles_dir.display());
        return Ok(TaskReport::new(TaskKind::Style, Vec::new()));
    }

    let mut concatenated = String::new();
    for path in &sources {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        concatenated.push_str(&content);
        concatenated.push('\n');
    }

    let options = grass::Options::default().load_path(&styles_dir);
    let css = grass::from_string(concatenated, &options)
        .map_err(|e| anyhow!("scss compile failed: {e}"))?;

    let minified = minify_css(&css)?;

    let out_dir = config.dist_css();
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let output = out_dir.join(OUTPUT_NAME);
    fs::write(&output, minified)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(TaskReport::new(TaskKind::Style, vec![output]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::Path;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = test_parse_config("");
        config.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_two_files_compiled_into_one_minified_output() {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("src/app/scss");
        fs::create_dir_all(&scss).unwrap();
        fs::write(scss.join("a.scss"), ".a { color: red; }\n").unwrap();
        fs::write(scss.join("b.scss"), ".b { color: blue; }\n").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        assert_eq!(report.outputs.len(), 1);
        assert!(report.outputs[0].ends_with("dist/css/index.min.css"));

        let css = fs::read_to_string(&report.outputs[0]).unwrap();
        assert!(css.contains(".a"));
        assert!(css.contains(".b"));
        assert!(css.contains("red"));
        assert!(css.contains("blue"));
        // minified: no indented declarations left
        assert!(!css.contains("\n  "));
    }

    #[test]
    fn test_scss_nesting_compiled() {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("src/app/scss");
        fs::create_dir_all(&scss).unwrap();
        fs::write(
            scss.join("nav.scss"),
            "$fg: #333;\nnav { color: $fg; a { color: $fg; } }\n",
        )
        .unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        let css = fs::read_to_string(&report.outputs[0]).unwrap();
        assert!(css.contains("nav a"));
        assert!(!css.contains("$fg"));
    }

    #[test]
    fn test_compile_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("src/app/scss");
        fs::create_dir_all(&scss).unwrap();
        fs::write(scss.join("broken.scss"), ".a { color: ").unwrap();

        assert!(run(&config_at(dir.path())).is_err());
    }

    #[test]
    fn test_empty_source_set_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(&config_at(dir.path())).unwrap();
        assert!(report.outputs.is_empty());
        assert!(!dir.path().join("dist/css/index.min.css").exists());
    }

    #[test]
    fn test_deterministic_cascade_order() {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("src/app/scss");
        fs::create_dir_all(&scss).unwrap();
        // Same selector in both; later file (lexicographically) must win
        fs::write(scss.join("a.scss"), "p { color: red; }\n").unwrap();
        fs::write(scss.join("z.scss"), "p { color: blue; }\n").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        let css = fs::read_to_string(&report.outputs[0]).unwrap();
        let red = css.find("red").expect("red rule present");
        let blue = css.find("blue").expect("blue rule present");
        assert!(red < blue);
    }
}
