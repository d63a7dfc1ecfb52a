//! Path classification: changed file -> responsible task.

use std::path::Path;

use crate::config::SiteConfig;
use crate::config::paths::IMAGE_EXTENSIONS;
use crate::task::TaskKind;

/// Map a changed path to the task that consumes it.
///
/// The style/script/image directories are checked before the HTML subtree
/// since they usually nest inside it; editor temp files never match.
pub(super) fn classify(path: &Path, config: &SiteConfig) -> Option<TaskKind> {
    if is_temp_file(path) {
        return None;
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if path.starts_with(config.styles_dir()) {
        return (ext == "scss").then_some(TaskKind::Style);
    }
    if path.starts_with(config.scripts_dir()) {
        return (ext == "js").then_some(TaskKind::Script);
    }
    if path.starts_with(config.images_dir()) {
        return IMAGE_EXTENSIONS
            .contains(&ext.as_str())
            .then_some(TaskKind::Image);
    }
    if path.starts_with(config.html_root()) {
        return matches!(ext.as_str(), "html" | "htm").then_some(TaskKind::Html);
    }

    None
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}
