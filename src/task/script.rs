//! Script task: concatenate JS sources and minify.
//!
//! Same deterministic ordering as the style task. A syntax error anywhere
//! in the concatenated sources aborts the task.

use std::fs;

use anyhow::{Context, Result};

use super::{TaskKind, TaskReport, minify_js};
use crate::config::SiteConfig;
use crate::utils;

/// Output file name: one logical unit, minified marker in the name.
pub const OUTPUT_NAME: &str = "index.min.js";

/// Minify all script sources into `dist/js/index.min.js`.
pub fn run(config: &SiteConfig) -> Result<TaskReport> {
    let scripts_dir = config.scripts_dir();
    let sources = utils::fs::collect_sorted(&scripts_dir, &["js"]);
    if sources.is_empty() {
        crate::debug!("script"; "no js sources under {}", scripts_dir.display());
        return Ok(TaskReport::new(TaskKind::Script, Vec::new()));
    }

    let mut concatenated = String::new();
    for path in &sources {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        concatenated.push_str(&content);
        // Guard against sources missing a trailing terminator
        if !content.ends_with('\n') {
            concatenated.push('\n');
        }
    }

    let minified = minify_js(&concatenated)
        .with_context(|| format!("script task failed in {}", scripts_dir.display()))?;

    let out_dir = config.dist_js();
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let output = out_dir.join(OUTPUT_NAME);
    fs::write(&output, minified)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(TaskReport::new(TaskKind::Script, vec![output]))
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
    fn test_sources_merged_and_minified() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("src/app/js");
        fs::create_dir_all(&js).unwrap();
        fs::write(js.join("a.js"), "const first  =  1;\nwindow.first = first;\n").unwrap();
        fs::write(js.join("b.js"), "// comment\nwindow.second = 2;\n").unwrap();

        let report = run(&config_at(dir.path())).unwrap();
        assert_eq!(report.outputs.len(), 1);
        assert!(report.outputs[0].ends_with("dist/js/index.min.js"));

        let code = fs::read_to_string(&report.outputs[0]).unwrap();
        assert!(code.contains("window.first"));
        assert!(code.contains("window.second"));
        assert!(!code.contains("// comment"));
        assert!(!code.contains("  "));
    }

    #[test]
    fn test_syntax_error_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let js = dir.path().join("src/app/js");
        fs::create_dir_all(&js).unwrap();
        fs::write(js.join("broken.js"), "function ( {").unwrap();

        assert!(run(&config_at(dir.path())).is_err());
    }

    #[test]
    fn test_empty_source_set_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(&config_at(dir.path())).unwrap();
        assert!(report.outputs.is_empty());
        assert!(!dir.path().join("dist/js/index.min.js").exists());
    }
}
