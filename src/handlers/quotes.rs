// src/handlers/quotes.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{
    common::{error::AppError, format::pdf_filename},
    config::AppState,
    models::quote::{QuoteResult, ServiceRequest},
    services::quote_service,
};

// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "API Cotizador 48 Voltios - OK" }))
}

// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// POST /api/quotes/json
pub async fn quote_json(
    Json(payload): Json<ServiceRequest>,
) -> Result<Json<QuoteResult>, AppError> {
    let quote = quote_service::compute(&payload)?;

    tracing::info!(
        "Cotização calculada para '{}': {} itens, total {}",
        quote.client_name,
        quote.items.len(),
        quote.grand_total
    );

    Ok(Json(quote))
}

// POST /api/quotes/pdf
pub async fn quote_pdf(
    State(app_state): State<AppState>,
    Json(payload): Json<ServiceRequest>,
) -> Result<Response, AppError> {
    let quote = quote_service::compute(&payload)?;
    let filename = pdf_filename(payload.output_filename.as_deref(), &quote.client_name);

    tracing::info!(
        "Gerando PDF '{}' para '{}' (total {})",
        filename,
        quote.client_name,
        quote.grand_total
    );

    // genpdf é síncrono e pesado; fora do runtime
    let renderer = app_state.renderer.clone();
    let assets = app_state.assets.clone();
    let pdf_bytes = tokio::task::spawn_blocking(move || renderer.render(&quote, assets.as_ref()))
        .await
        .map_err(|e| AppError::InternalServerError(anyhow::Error::new(e)))??;

    // Configura os Headers para o navegador baixar ou mostrar o PDF
    let disposition = format!("attachment; filename=\"{}\"", filename);
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, pdf_bytes).into_response())
}
