use perpwatch::api;
use perpwatch::config::Config;
use perpwatch::datasource::JupiterRpcSource;
use perpwatch::domain::InstrumentTable;
use perpwatch::notify::TelegramSink;
use perpwatch::orchestration::Poller;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        wallet = %config.wallet_address,
        interval_secs = config.poll_interval_secs,
        recipients = config.telegram_allowed_users.len(),
        "starting PnL monitoring"
    );

    let source = Arc::new(JupiterRpcSource::new(config.rpc_url.clone()));
    let sink = Arc::new(TelegramSink::new(
        config.telegram_bot_token.clone(),
        config.telegram_allowed_users.clone(),
    ));
    let poller = Arc::new(Poller::new(
        source.clone(),
        source,
        sink,
        InstrumentTable::jupiter_mainnet(),
        config.wallet_address.clone(),
        Duration::from_secs(config.poll_interval_secs),
    ));

    tokio::spawn({
        let poller = poller.clone();
        async move { poller.run().await }
    });

    // Liveness endpoints
    let app = api::create_router(api::AppState::new());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
