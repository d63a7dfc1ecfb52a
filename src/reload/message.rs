//! Live reload message protocol.
//!
//! JSON messages sent from the development server to browser clients.
//!
//! # Message Types
//!
//! - `connected`: handshake acknowledgement with server version
//! - `reload`: trigger a full page reload
//! - `css`: re-fetch a stylesheet in place (no page reload)

use serde::{Deserialize, Serialize};

/// Live reload message sent over WebSocket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LiveReloadMessage {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// Full page reload
    Reload {
        /// Which task triggered the reload
        reason: String,
    },

    /// Stylesheet hot swap (no layout-destroying reload)
    Css {
        /// Server path of the rebuilt stylesheet (e.g. "/css/index.min.css")
        path: String,
    },
}

impl LiveReloadMessage {
    /// Handshake message for a freshly accepted client.
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Full reload triggered by `reason`.
    pub fn reload(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: reason.into(),
        }
    }

    /// Stylesheet swap for the given server path.
    pub fn css(path: impl Into<String>) -> Self {
        Self::Css { path: path.into() }
    }

    /// Serialize to the wire format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"type\":\"reload\"}".to_string())
    }
}
