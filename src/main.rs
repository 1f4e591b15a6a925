use ask_proxy::config::Config;
use ask_proxy::{AppState, build_app};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::from_env();

    // the ask endpoint reports this per request; the server still starts
    info!("API key loaded: {}", config.api_key_configured());
    if !config.api_key_configured() {
        warn!("DEEPSEEK_API_KEY is not set, /api/ask will return a configuration error");
    }

    let addr = config.bind_addr();
    let app = build_app(AppState::new(config));

    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())

}
