use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod constants;
mod control;
mod encoder;
mod feed;
mod html_template;
mod layers;
mod legend;
mod server;
mod settings;
mod tiles;

use feed::HttpFeedSource;
use server::{start_server, AppState};
use settings::Settings;

/// Fetches both feeds once and writes a self-contained HTML page.
async fn write_snapshot(feeds: &HttpFeedSource, settings: &Settings, path: &str) -> Result<()> {
    info!("📸 Building map snapshot...");
    let ctx = app::initialize(feeds, settings).await;
    let html = html_template::render_snapshot(&ctx)?;
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write snapshot to {}", path))?;
    info!("✅ Snapshot written to {}", path);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🗺️  QuakeMap v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = Settings::config_path();
    let settings = if config_path.exists() {
        Settings::load().with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        let defaults = Settings::default();
        defaults.save()?;
        info!("📝 Wrote default configuration to {}", config_path.display());
        defaults
    };

    info!("   🌋 Earthquake feed: {}", settings.earthquake_feed_url);
    info!("   🧱 Plates feed: {}", settings.plates_feed_url);
    info!("   ⏱️  Fetch mode: {:?}", settings.fetch_mode);

    let feeds = HttpFeedSource::new();

    if let Some(ref path) = settings.snapshot_path {
        write_snapshot(&feeds, &settings, path).await?;
    }

    let app_state = AppState {
        feeds: Arc::new(feeds),
        settings: Arc::new(settings),
    };

    start_server(app_state).await?;

    Ok(())
}
