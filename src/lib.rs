// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod common;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppState;

pub fn app(app_state: AppState) -> Router {
    let quote_routes = Router::new()
        .route("/json", post(handlers::quotes::quote_json))
        .route("/pdf", post(handlers::quotes::quote_pdf));

    Router::new()
        .route("/", get(handlers::quotes::root))
        .route("/health", get(handlers::quotes::health))
        .nest("/api/quotes", quote_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        // Qualquer origem, como na primeira versão da API
        .layer(CorsLayer::permissive())
}
