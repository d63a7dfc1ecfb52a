//! Sitepipe - a static-site asset pipeline with dev server and live reload.

mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod reload;
mod task;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Build { .. } => run_build(&config),
        Commands::Serve { .. } => run_serve(&config),
    }
}

/// One-shot pipeline: html first, then style/script/image concurrently.
fn run_build(config: &SiteConfig) -> Result<()> {
    let summary = cli::build::build_assets(config)?;
    summary.log();
    Ok(())
}

/// Build, bind the HTTP server, open the browser, then watch until Ctrl+C.
fn run_serve(config: &SiteConfig) -> Result<()> {
    let summary = cli::build::build_assets(config)?;
    summary.log();

    let hub = if config.serve.watch {
        // Same interface as the HTTP server so LAN clients reach both
        Some(reload::ReloadHub::start(
            config.serve.interface,
            reload::DEFAULT_WS_PORT,
        )?)
    } else {
        None
    };

    let bound = cli::serve::bind_server(config)?;

    if config.serve.open {
        utils::platform::open_browser(&format!("http://{}", bound.addr()));
    }

    bound.run(hub)
}
