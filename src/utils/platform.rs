//! Platform integration: opening the default browser.

use std::process::Command;

/// Open `url` in the platform's default browser.
///
/// Best effort: a failure is logged at debug level and otherwise ignored,
/// the server keeps running either way.
pub fn open_browser(url: &str) {
    let result = spawn_opener(url);
    match result {
        Ok(_) => crate::debug!("serve"; "opened browser at {}", url),
        Err(e) => crate::debug!("serve"; "failed to open browser: {}", e),
    }
}

#[cfg(target_os = "macos")]
fn spawn_opener(url: &str) -> std::io::Result<std::process::Child> {
    Command::new("open").arg(url).spawn()
}

#[cfg(target_os = "windows")]
fn spawn_opener(url: &str) -> std::io::Result<std::process::Child> {
    Command::new("cmd").args(["/C", "start", "", url]).spawn()
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn spawn_opener(url: &str) -> std::io::Result<std::process::Child> {
    Command::new("xdg-open").arg(url).spawn()
}
