//! Pipeline configuration management for `sitepipe.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                         |
//! |-----------|-------------------------------------------------|
//! | `[paths]` | Source globs and the distribution directory     |
//! | `[serve]` | Development server (port, interface, open, ...) |
//!
//! All fields are defaulted so a project laid out like the stock
//! `src/app/` tree needs no config file at all.

mod error;
mod handle;
pub mod paths;
mod serve;

pub use error::ConfigError;
pub use handle::{cfg, init_config};
pub use paths::PathsConfig;
pub use serve::ServeConfig;

use crate::{
    cli::{Cli, Commands},
    logger,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitepipe.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source and output paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration, searching upward from the CWD for the config
    /// file named by `-C/--config`. A missing file yields pure defaults
    /// rooted at the CWD.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => Self::from_file(&path)?,
            None => {
                let root = std::env::current_dir().context("cannot determine current directory")?;
                Self {
                    config_path: root.join(&cli.config),
                    root,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse a config file and root the paths at its parent directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })
            .with_context(|| format!("invalid config {}", path.display()))?;

        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Fold CLI flags into the loaded config.
    fn apply_cli(&mut self, cli: &Cli) {
        let build_args = cli.build_args();
        logger::set_verbose(build_args.verbose);
        if let Some(dist) = &build_args.dist {
            self.paths.dist = dist.clone();
        }

        if let Commands::Serve {
            interface,
            port,
            open,
            watch,
            ..
        } = &cli.command
        {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
            if let Some(open) = open {
                self.serve.open = *open;
            }
            if let Some(watch) = watch {
                self.serve.watch = *watch;
            }
        }
    }

    /// Resolve a config-relative path against the project root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    // Resolved source paths

    /// Entry HTML document.
    pub fn html_entry(&self) -> PathBuf {
        self.root_join(&self.paths.html_entry)
    }

    /// Root of the watched HTML subtree.
    pub fn html_root(&self) -> PathBuf {
        self.root_join(&self.paths.html_root)
    }

    /// Style sources directory (`*.scss`).
    pub fn styles_dir(&self) -> PathBuf {
        self.root_join(&self.paths.styles)
    }

    /// Script sources directory (`*.js`).
    pub fn scripts_dir(&self) -> PathBuf {
        self.root_join(&self.paths.scripts)
    }

    /// Image sources directory.
    pub fn images_dir(&self) -> PathBuf {
        self.root_join(&self.paths.images)
    }

    // Resolved output paths

    /// Distribution root.
    pub fn dist_dir(&self) -> PathBuf {
        self.root_join(&self.paths.dist)
    }

    /// CSS output directory (`dist/css`).
    pub fn dist_css(&self) -> PathBuf {
        self.dist_dir().join("css")
    }

    /// JS output directory (`dist/js`).
    pub fn dist_js(&self) -> PathBuf {
        self.dist_dir().join("js")
    }

    /// Image output directory (`dist/imgs`).
    pub fn dist_imgs(&self) -> PathBuf {
        self.dist_dir().join("imgs")
    }
}

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    // First check if config_name is an absolute path or exists in cwd
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from cwd looking for config file
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> SiteConfig {
    let mut config: SiteConfig = toml::from_str(content).expect("config should parse");
    config.root = PathBuf::from("/project");
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_layout() {
        let config = test_parse_config("");
        assert_eq!(config.html_entry(), Path::new("/project/src/app/index.html"));
        assert_eq!(config.styles_dir(), Path::new("/project/src/app/scss"));
        assert_eq!(config.scripts_dir(), Path::new("/project/src/app/js"));
        assert_eq!(config.images_dir(), Path::new("/project/src/app/imgs"));
        assert_eq!(config.dist_dir(), Path::new("/project/dist"));
        assert_eq!(config.dist_css(), Path::new("/project/dist/css"));
        assert_eq!(config.dist_js(), Path::new("/project/dist/js"));
        assert_eq!(config.dist_imgs(), Path::new("/project/dist/imgs"));
    }

    #[test]
    fn test_paths_override() {
        let config = test_parse_config("[paths]\ndist = \"public\"\nstyles = \"styles\"");
        assert_eq!(config.dist_dir(), Path::new("/project/public"));
        assert_eq!(config.styles_dir(), Path::new("/project/styles"));
        // untouched fields keep defaults
        assert_eq!(config.scripts_dir(), Path::new("/project/src/app/js"));
    }

    #[test]
    fn test_absolute_path_not_rejoined() {
        let config = test_parse_config("[paths]\ndist = \"/var/www/site\"");
        assert_eq!(config.dist_dir(), Path::new("/var/www/site"));
    }

    #[test]
    fn test_from_file_roots_at_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitepipe.toml");
        fs::write(&path, "[serve]\nport = 3000\n").unwrap();

        let config = SiteConfig::from_file(&path).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitepipe.toml");
        fs::write(&path, "[serve\nport = ").unwrap();

        assert!(SiteConfig::from_file(&path).is_err());
    }
}
