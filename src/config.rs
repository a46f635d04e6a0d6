// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use crate::services::{
    assets::{AssetSource, DirAssetSource},
    document_service::{DEFAULT_FONT_FAMILY, QuoteRenderer},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub assets_dir: PathBuf,
    pub logo_file: String,
    pub signature_file: String,
    pub fonts_dir: PathBuf,
    pub font_family: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            assets_dir: PathBuf::from(var_or("ASSETS_DIR", "./assets")),
            logo_file: var_or("LOGO_FILE", "logo48v.png"),
            signature_file: var_or("SIGNATURE_FILE", "firma_jorge.png"),
            fonts_dir: PathBuf::from(var_or("FONTS_DIR", "./fonts")),
            font_family: var_or("FONT_FAMILY", DEFAULT_FONT_FAMILY),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<QuoteRenderer>,
    pub assets: Arc<dyn AssetSource>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        // Sem fontes o servidor sobe mesmo assim: só o PDF fica indisponível
        let renderer = QuoteRenderer::from_font_dir(&config.fonts_dir, &config.font_family);

        let assets = DirAssetSource::new(
            &config.assets_dir,
            config.logo_file.as_str(),
            config.signature_file.as_str(),
        );
        tracing::info!("Assets de marca em {}", assets.dir().display());

        Self::from_parts(renderer, assets)
    }

    pub fn from_parts(renderer: QuoteRenderer, assets: impl AssetSource + 'static) -> Self {
        Self {
            renderer: Arc::new(renderer),
            assets: Arc::new(assets),
        }
    }
}
