//! Development server over the distribution directory.

mod lifecycle;
mod path;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::config::{SiteConfig, cfg};
use crate::reload::ReloadHub;
use crate::{core, log, watch};

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without entering the request loop.
///
/// Split from [`BoundServer::run`] so the caller can open the browser
/// against an already-live socket.
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the watcher (when live reload is on) and block on the
    /// request loop until Ctrl+C.
    pub fn run(self, hub: Option<ReloadHub>) -> Result<()> {
        let watch_handle = hub
            .as_ref()
            .map(|hub| watch::spawn(cfg(), hub.clone(), self.shutdown_rx.clone()));

        run_request_loop(&self.server, hub.as_ref().map(ReloadHub::port));
        lifecycle::wait_for_shutdown(watch_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, ws_port: Option<u16>) {
    let config = cfg();
    // Thread pool keeps a slow disk read from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(&config);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, ws_port) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig, ws_port: Option<u16>) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    if let Some(path) = path::resolve_path(request.url(), &config.dist_dir()) {
        return response::respond_file(request, &path, ws_port);
    }

    response::respond_not_found(request, config, ws_port)
}
