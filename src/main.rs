use portfolio_client::config::config;
use portfolio_client::site::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PORTFOLIO_API_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!(
        "Starting portfolio site in {:?} mode against {}",
        config.environment,
        config.api.base_url
    );

    let state = AppState::new(config.clone())?;
    let app = site::router(state);

    let bind_addr = format!("0.0.0.0:{}", config.site.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Portfolio site listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
