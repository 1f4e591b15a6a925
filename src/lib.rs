pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use reqwest::Client;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use config::Config;

// shared by every handler: the config is read-only after startup and the
// http client is reused so connections are pooled across asks
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http_client: Client
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config: Arc::new(config),
            http_client: Client::new()
        }
    }
}

pub fn build_app(state: AppState) -> Router {

    let api = Router::new()
        .route("/ask", post(handlers::ask).fallback(handlers::method_not_allowed))
        .route("/health", get(handlers::health_check).fallback(handlers::method_not_allowed))
        .fallback(handlers::not_found);

    // everything outside /api is the bundled frontend; ServeDir answers
    // "/" with index.html and missing assets with 404
    let frontend = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api)
        .fallback_service(frontend)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .with_state(state)

}
