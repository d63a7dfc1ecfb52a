//! Reload hub: the explicit handle tasks broadcast through.

use std::net::{IpAddr, TcpStream};
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::message::LiveReloadMessage;
use super::server;

/// Shared list of connected browser clients.
pub(super) type ClientList = Arc<Mutex<Vec<WebSocket<TcpStream>>>>;

/// Handle to the live-reload channel.
///
/// Cloning is cheap; all clones broadcast to the same client list.
#[derive(Clone)]
pub struct ReloadHub {
    clients: ClientList,
    port: u16,
}

impl ReloadHub {
    /// Bind the WebSocket listener on `interface` (retrying upward from
    /// `base_port`) and start the acceptor thread.
    pub fn start(interface: IpAddr, base_port: u16) -> Result<Self> {
        let clients: ClientList = Arc::new(Mutex::new(Vec::new()));
        let port = server::start_acceptor(interface, base_port, Arc::clone(&clients))?;
        crate::debug!("reload"; "ws://{}:{}", interface, port);
        Ok(Self { clients, port })
    }

    /// Port the WebSocket server actually bound (after retries).
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Number of currently connected clients.
    #[allow(dead_code)] // Used by tests
    pub fn client_count(&self) -> usize {
        self.clients.lock().len()
    }

    /// Send a message to every connected client, dropping dead connections.
    pub fn broadcast(&self, msg: &LiveReloadMessage) {
        let text = msg.to_json();
        let mut clients = self.clients.lock();
        let before = clients.len();
        clients.retain_mut(|ws| ws.send(Message::Text(text.clone().into())).is_ok());
        let dropped = before - clients.len();
        if dropped > 0 {
            crate::debug!("reload"; "dropped {} dead client(s)", dropped);
        }
    }
}
