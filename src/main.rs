use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use tankmix::bot::Engine;
use tankmix::config::BotConfig;
use tankmix::dataset::Dataset;
use tankmix::localization::LocalizationManager;
use tankmix::webhook;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting tank-mix compatibility bot");

    let config = BotConfig::from_env();
    if !config.twilio.is_configured() {
        warn!("Twilio credentials not fully configured; replies ride the webhook response only");
    }

    let dataset = Arc::new(Dataset::load(&config.data_dir)?);
    info!(
        categories = dataset.category_names().len(),
        path = %config.data_dir.display(),
        "Compatibility dataset loaded"
    );

    let localization = Arc::new(LocalizationManager::new()?);
    let engine = Arc::new(Engine::new(dataset, localization));

    let app = webhook::routes(engine);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Webhook server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
