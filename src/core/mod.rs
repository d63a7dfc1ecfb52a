//! Process-wide state: shutdown signalling and server registration.

mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
