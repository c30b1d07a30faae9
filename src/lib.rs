//! Educational resource catalog and mock learning-path service.

pub mod data;
pub mod error;
pub mod handlers;
pub mod models;
pub mod recommender;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::state::{AppState, Config};

/// Builds the application router.
///
/// API routes take precedence; everything else falls through to the static
/// directory. In production, unknown paths get `index.html` so client-side
/// routes resolve.
pub fn app(state: Arc<AppState>, config: &Config) -> Router {
    let assets = ServeDir::new(&config.static_dir);

    let api = Router::new()
        .route("/api/resources", get(handlers::list_resources))
        .route("/api/generate-path", post(handlers::generate_path))
        .route("/api/stats", get(handlers::stats))
        .with_state(state);

    let router = if config.production {
        api.fallback_service(
            assets.fallback(ServeFile::new(config.static_dir.join("index.html"))),
        )
    } else {
        api.fallback_service(assets)
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
