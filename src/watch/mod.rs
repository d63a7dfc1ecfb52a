//! Watch coordinator.
//!
//! Watches the four source globs and re-runs the owning task on change.
//! Reload decisions live here, in one place: tasks only return their
//! completion report, the coordinator picks the reload action.
//!
//! ```text
//! notify -> Debouncer (pure timing) -> Classifier (path -> task) -> run + reload
//! ```

mod classifier;
mod debouncer;

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Result;
use crossbeam::channel::{self, Receiver};
use notify::{RecursiveMode, Watcher};

use crate::config::SiteConfig;
use crate::logger;
use crate::reload::{LiveReloadMessage, ReloadHub};
use crate::task::{TaskKind, TaskReport, style};
use classifier::classify;
use debouncer::Debouncer;

/// Spawn the watch loop on its own thread.
///
/// Events arriving while a rebuild is in flight stay buffered in the
/// channel and are debounced into the next cycle.
pub fn spawn(
    config: Arc<SiteConfig>,
    hub: ReloadHub,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run(&config, &hub, &shutdown_rx) {
            crate::log!("watch"; "watcher failed: {}", e);
        }
    })
}

fn run(
    config: &SiteConfig,
    hub: &ReloadHub,
    shutdown_rx: &Receiver<()>,
) -> notify::Result<()> {
    let (event_tx, event_rx) = channel::unbounded::<notify::Result<notify::Event>>();

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })?;

    let roots = watch_roots(config);
    for root in &roots {
        watcher.watch(root, RecursiveMode::Recursive)?;
        crate::debug!("watch"; "watching {}", root.display());
    }
    crate::log!("watch"; "watching for changes");

    let mut debouncer = Debouncer::new();

    loop {
        channel::select! {
            recv(shutdown_rx) -> _ => break,
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => handle_event(&event, config, &mut debouncer),
                Ok(Err(e)) => crate::log!("watch"; "notify error: {}", e),
                Err(_) => break, // Watcher dropped
            },
            default(debouncer.sleep_duration()) => {
                if let Some(dirty) = debouncer.take_if_ready() {
                    rebuild(&dirty, config, hub);
                }
            }
        }
    }

    Ok(())
}

/// Source roots to watch, minus ones nested under an already-watched root
/// (the stock layout nests scss/js/imgs inside the html subtree).
fn watch_roots(config: &SiteConfig) -> Vec<PathBuf> {
    let candidates = [
        config.html_root(),
        config.styles_dir(),
        config.scripts_dir(),
        config.images_dir(),
    ];

    let mut roots: Vec<PathBuf> = Vec::new();
    for candidate in candidates {
        if !candidate.is_dir() {
            continue;
        }
        if roots.iter().any(|root| candidate.starts_with(root)) {
            continue;
        }
        roots.push(candidate);
    }
    roots
}

/// Feed one notify event through the classifier into the debouncer.
fn handle_event(event: &notify::Event, config: &SiteConfig, debouncer: &mut Debouncer) {
    use notify::EventKind;

    match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => {}
        EventKind::Modify(modify) => {
            // Ignore metadata-only changes (mtime/atime/chmod noise)
            // may trigger endless rebuild loops
            if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                return;
            }
        }
        _ => return,
    }

    for path in &event.paths {
        if let Some(kind) = classify(path, config) {
            crate::debug!("watch"; "{} -> {} task", path.display(), kind.label());
            debouncer.mark(kind);
        }
    }
}

/// Run the dirty tasks and broadcast the reload decision for each.
fn rebuild(dirty: &[TaskKind], config: &SiteConfig, hub: &ReloadHub) {
    for &kind in dirty {
        let outcome = kind.run(config);
        match &outcome {
            Ok(report) => {
                logger::status_success(&format!(
                    "{} task rebuilt ({} file{})",
                    kind.label(),
                    report.outputs.len(),
                    if report.outputs.len() == 1 { "" } else { "s" }
                ));
            }
            Err(e) => {
                // A failed task keeps the previous output on disk
                logger::status_error(&format!("{} task failed", kind.label()), &format!("{e:#}"));
            }
        }

        if let Some(msg) = reload_action(kind, &outcome) {
            hub.broadcast(&msg);
        }
    }
}

/// Reload decision for one finished task. Failures stay silent; a
/// stylesheet rebuild hot-swaps without losing page state, everything
/// else reloads the page.
fn reload_action(kind: TaskKind, outcome: &Result<TaskReport>) -> Option<LiveReloadMessage> {
    if outcome.is_err() {
        return None;
    }
    Some(match kind {
        TaskKind::Style => LiveReloadMessage::css(format!("/css/{}", style::OUTPUT_NAME)),
        _ => LiveReloadMessage::reload(kind.label()),
    })
}
