use moodmate::{router, AppConfig, AppState, EntryStore, JsonFileStore, OpenWeatherClient};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();

    let store = JsonFileStore::new(&config.data_path);
    store.ensure_parent_dir().await?;
    let entries = store.load().await;
    info!(
        entries = entries.len(),
        path = %config.data_path.display(),
        "loaded journal"
    );

    if config.weather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY is not set, entries will use fallback weather");
    }
    let weather = OpenWeatherClient::new(&config)?;

    let state = AppState::new(entries, Arc::new(store), Arc::new(weather));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
