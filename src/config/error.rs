//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading `sitepipe.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but is not valid TOML (or has wrong types).
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
