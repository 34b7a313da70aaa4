use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use sunset_chart::{
    board::LoadBoard,
    config::Config,
    api::routes::create_router,
    fetcher::spawn_fetches,
    model::{default_dates, CITIES},
    sunset_api::SunsetApiClient,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;

    let dates = default_dates();
    let board = Arc::new(LoadBoard::new(&CITIES));
    let source = Arc::new(SunsetApiClient::from_config(&config));
    info!(
        "Fetching sunsets for {} cities over {} dates from {}",
        CITIES.len(),
        dates.len(),
        source.base_url()
    );
    // Fetch tasks publish to the board on their own; nothing waits on them.
    spawn_fetches(Arc::clone(&board), source, &CITIES, &dates);

    let app_state = AppState {
        config: Arc::new(config),
        board,
        dates: Arc::new(dates),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!("Listening on http://{}", server_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
