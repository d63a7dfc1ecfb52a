//! Live reload over WebSocket.
//!
//! # Architecture
//!
//! ```text
//! watch coordinator --[ReloadHub]--> connected browsers
//! ```
//!
//! The [`ReloadHub`] is an explicit, cloneable handle owning the client
//! list. It is created once in `main` and passed into the dev server (for
//! script injection) and the watch coordinator (for broadcasts) - there is
//! no module-level singleton.

mod hub;
pub mod message;
mod server;

pub use hub::ReloadHub;
pub use message::LiveReloadMessage;

/// Default WebSocket port for live reload.
pub const DEFAULT_WS_PORT: u16 = 35729;
