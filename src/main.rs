//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cotizador::config::{AppConfig, AppState};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let app_state = AppState::new(&config);

    if !app_state.renderer.is_available() {
        tracing::warn!("⚠️ Servidor sem PDF: apenas /api/quotes/json responde com sucesso");
    }

    let app = cotizador::app(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", config.bind_addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
