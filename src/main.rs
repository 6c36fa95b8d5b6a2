// sitewiki: terminal browser for a curated catalog of websites.
// Sets up logging, the catalog client, and the terminal, then runs the app.

mod app;
mod cache;
mod catalog;
mod config;
mod error;
mod remote;
mod state;
mod ui;

use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::Config;
use crate::remote::CatalogClient;

/// Send logs to a file in the cache directory; stdout belongs to the TUI.
fn init_logging() -> error::Result<()> {
    let Some(path) = cache::paths::log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let config = Config::load()?;
    init_logging()?;
    info!(base_url = %config.base_url, "starting");

    let client = Arc::new(CatalogClient::from_config(&config)?);
    let mut app = App::new(client, config.export_dir());

    let mut terminal = ratatui::try_init()?;
    let result = app.run(&mut terminal);
    ratatui::try_restore()?;
    result?;

    info!("exiting");
    Ok(())
}
