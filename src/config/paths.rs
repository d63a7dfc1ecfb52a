//! `[paths]` section configuration.
//!
//! Source globs and output directory, all relative to the project root
//! (the directory holding `sitepipe.toml`).
//!
//! # Example
//!
//! ```toml
//! [paths]
//! html_entry = "src/app/index.html"
//! html_root  = "src/app"
//! styles     = "src/app/scss"
//! scripts    = "src/app/js"
//! images     = "src/app/imgs"
//! dist       = "dist"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image extensions handled by the image task. Anything else under the
/// images directory is ignored entirely.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg"];

/// Source and output path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Entry HTML document with `@@include` directives.
    pub html_entry: PathBuf,

    /// Root of the HTML subtree (watched recursively for `*.html`).
    pub html_root: PathBuf,

    /// Style sources directory, scanned recursively for `*.scss`.
    pub styles: PathBuf,

    /// Script sources directory, scanned recursively for `*.js`.
    pub scripts: PathBuf,

    /// Image sources directory.
    pub images: PathBuf,

    /// Distribution root. `css/`, `js/` and `imgs/` live beneath it.
    pub dist: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            html_entry: PathBuf::from("src/app/index.html"),
            html_root: PathBuf::from("src/app"),
            styles: PathBuf::from("src/app/scss"),
            scripts: PathBuf::from("src/app/js"),
            images: PathBuf::from("src/app/imgs"),
            dist: PathBuf::from("dist"),
        }
    }
}
