mod action;
mod app;
mod app_state;
mod columns;
mod component;
mod components;
mod http;
mod theme;
mod widgets;

use std::sync::Arc;

use stax_proto::config::{data_dir, Config};
use stax_proto::location::SessionLocation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("stax.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("stax log: {}", log_path.display());

    tracing::info!("stax starting…");

    let config = Config::load().unwrap_or_default();

    let source = Arc::new(http::HttpFolderSource::new(config.server.base_url.clone()));
    let location = SessionLocation::load(config.paths.session_file.clone());

    app::App::new(source, location).run().await?;

    Ok(())
}
