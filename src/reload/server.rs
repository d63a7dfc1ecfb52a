//! WebSocket acceptor for live reload clients.

use std::net::{IpAddr, SocketAddr, TcpListener};

use anyhow::Result;
use tungstenite::protocol::Message;

use super::hub::ClientList;
use super::message::LiveReloadMessage;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Bind a listener and spawn the acceptor thread.
///
/// The listener binds the same interface as the HTTP server, so clients
/// that can fetch the page can also reach the reload channel. Each
/// accepted connection is upgraded with a WebSocket handshake, greeted
/// with a `connected` message and pushed into the shared client list.
/// Returns the port that was actually bound.
pub(super) fn start_acceptor(interface: IpAddr, base_port: u16, clients: ClientList) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    crate::log!("reload"; "accept error: {}", e);
                    continue;
                }
            };

            if let Ok(addr) = stream.peer_addr() {
                crate::debug!("reload"; "client connected: {}", addr);
            }

            match tungstenite::accept(stream) {
                Ok(mut ws) => {
                    let greeting = LiveReloadMessage::connected().to_json();
                    if ws.send(Message::Text(greeting.into())).is_ok() {
                        clients.lock().push(ws);
                    }
                }
                Err(e) => {
                    crate::debug!("reload"; "handshake failed: {}", e);
                }
            }
        }
    });

    Ok(actual_port)
}

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(SocketAddr::new(interface, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind WebSocket server after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
