//! Rotas HTTP da API de cotação.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cotizador::config::AppState;
use cotizador::services::{assets::NoAssets, document_service::QuoteRenderer};

fn app_without_pdf() -> Router {
    let renderer = QuoteRenderer::unavailable("sem fontes no teste");
    cotizador::app(AppState::from_parts(renderer, NoAssets))
}

fn app_with_pdf() -> Router {
    let fonts = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts");
    let renderer = QuoteRenderer::from_font_dir(fonts, "DejaVuSans");
    assert!(renderer.is_available());
    cotizador::app(AppState::from_parts(renderer, NoAssets))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_and_root() {
    let response = app_without_pdf()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));

    let response = app_without_pdf()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "API Cotizador 48 Voltios - OK");
}

#[tokio::test]
async fn json_quote_scenario_d() {
    let request = post_json(
        "/api/quotes/json",
        json!({
            "clientName": "Cine Caribe",
            "serviceKind": "direct_sound",
            "directSound": { "days": 2, "shotgunMicCount": 1 },
            "applyTax": true,
            "discountPct": 20,
            "quoteDate": "02/02/2025"
        }),
    );
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["clientName"], "Cine Caribe");
    assert_eq!(body["quoteDate"], "02/02/2025");
    assert_eq!(body["items"][0]["lineTotal"], 300_000);
    assert_eq!(body["items"][0]["durationLabel"], "2 días");
    assert_eq!(body["directSoundSubtotal"], 300_000);
    assert_eq!(body["taxAmount"], 57_000);
    assert_eq!(body["discountAmount"], 71_400);
    assert_eq!(body["grandTotal"], 285_600);
}

#[tokio::test]
async fn invalid_service_kind_is_bad_request() {
    let request = post_json("/api/quotes/json", json!({ "serviceKind": "mastering" }));
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("mastering"));
}

#[tokio::test]
async fn validation_details_use_json_field_names() {
    let request = post_json(
        "/api/quotes/json",
        json!({
            "serviceKind": "both",
            "directSound": { "days": 50000 },
            "discountPct": 101
        }),
    );
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["details"]["discountPct"][0], "discount_out_of_range");
    assert!(body["details"].get("discount_pct").is_none());
    // Dias não têm teto
    assert_eq!(body["details"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn overflowing_amounts_are_bad_request() {
    let request = post_json(
        "/api/quotes/json",
        json!({
            "serviceKind": "direct_sound",
            "directSound": { "days": i64::MAX, "shotgunMicCount": 2 }
        }),
    );
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Micrófono Shotgun"));
}

#[tokio::test]
async fn pdf_download_with_requested_filename() {
    let request = post_json(
        "/api/quotes/pdf",
        json!({
            "clientName": "Cine Caribe",
            "serviceKind": "both",
            "directSound": { "days": 2, "shotgunMicCount": 1, "hasSoundEngineer": true },
            "postProduction": { "minutes": 5, "mixFormat": "stereo" },
            "applyTax": true,
            "discountPct": 10,
            "outputFilename": "orden 12"
        }),
    );
    let response = app_with_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"orden_12.pdf\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn pdf_filename_defaults_to_client_name() {
    let request = post_json(
        "/api/quotes/pdf",
        json!({
            "clientName": "Cine Caribe",
            "serviceKind": "post_production",
            "postProduction": { "minutes": 3 }
        }),
    );
    let response = app_with_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"cotizacion_Cine_Caribe.pdf\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn pdf_without_fonts_is_server_error_with_reason() {
    let request = post_json(
        "/api/quotes/pdf",
        json!({
            "serviceKind": "post_production",
            "postProduction": { "minutes": 10, "mixFormat": "5.1" }
        }),
    );
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("PDF indisponível"));
    assert!(message.contains("sem fontes no teste"));
}

#[tokio::test]
async fn pdf_of_empty_quote_is_bad_request() {
    let request = post_json(
        "/api/quotes/pdf",
        json!({ "serviceKind": "post_production", "postProduction": { "minutes": 0 } }),
    );
    let response = app_without_pdf().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
