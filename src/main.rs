use rebuild::config::AppConfig;
use rebuild::core::server::GenerationService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let _log_guard = rebuild::core::logging::init();
    tracing::info!("Rebuild v{} starting", rebuild::VERSION);

    let config = AppConfig::load();
    tracing::debug!(?config, "configuration loaded");

    let mut service = GenerationService::from_config(&config)?;
    service.start().await?;
    if let Some(url) = service.url() {
        tracing::info!("Open {} in a browser", url);
    }

    tokio::signal::ctrl_c().await?;
    if service.is_running() {
        service.stop().await;
    }

    Ok(())
}
