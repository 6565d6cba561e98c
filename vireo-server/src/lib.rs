//! HTTP front end for the Vireo library layer.
//!
//! The binary in `main.rs` loads configuration, builds the library from a
//! snapshot and serves [`create_app`].

pub mod api_types;
pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use infra::app_state::AppState;

/// Assemble the full router: `/health` at the root, the versioned API under
/// `/api`.
pub fn create_app(state: AppState) -> Router {
    let versioned_api = routes::create_api_router(state.clone());

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(versioned_api)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
