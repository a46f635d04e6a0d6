// src/models/quote.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const UNNAMED_CLIENT: &str = "Cliente sin nombre";

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    DirectSound,
    PostProduction,
    Both,
}

impl ServiceKind {
    pub fn includes_direct_sound(self) -> bool {
        matches!(self, ServiceKind::DirectSound | ServiceKind::Both)
    }

    pub fn includes_post_production(self) -> bool {
        matches!(self, ServiceKind::PostProduction | ServiceKind::Both)
    }
}

impl FromStr for ServiceKind {
    type Err = ();

    // Aceita os nomes novos e os aliases em espanhol da primeira versão da API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct_sound" | "sonido_directo" => Ok(ServiceKind::DirectSound),
            "post_production" | "postproduccion" => Ok(ServiceKind::PostProduction),
            "both" | "ambos" => Ok(ServiceKind::Both),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderTier {
    MixPre6,
    MixPre10,
}

impl RecorderTier {
    /// "6" e "10" são os únicos modelos; qualquer outro valor é "sem gravador".
    pub fn from_model(model: Option<&str>) -> Option<Self> {
        match model.map(str::trim) {
            Some("6") => Some(RecorderTier::MixPre6),
            Some("10") => Some(RecorderTier::MixPre10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixFormat {
    Stereo,
    Surround51,
}

impl MixFormat {
    // Só "stereo" literal é estéreo. Ausente ou vazio cai no padrão (stereo),
    // qualquer outro texto é cobrado como 5.1.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") => MixFormat::Stereo,
            Some(l) if l.eq_ignore_ascii_case("stereo") => MixFormat::Stereo,
            Some(_) => MixFormat::Surround51,
        }
    }
}

// --- Entrada ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectSoundSpec {
    #[serde(default)]
    pub days: i64,

    #[serde(default)]
    pub shotgun_mic_count: i64,

    #[serde(default)]
    pub lavalier_count: i64,

    #[serde(default)]
    pub monitor_count: i64,

    #[serde(default)]
    pub timecode_count: i64,

    /// "6", "10" ou vazio
    #[serde(default)]
    pub recorder_model: Option<String>,

    #[serde(default)]
    pub has_sound_engineer: bool,

    #[serde(default)]
    pub has_boom_operator: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostProductionSpec {
    #[serde(default)]
    pub minutes: i64,

    /// "stereo" ou "5.1"
    #[serde(default)]
    pub mix_format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(default)]
    pub client_name: Option<String>,

    // Mantido como texto: um valor desconhecido é erro de validação do
    // cálculo, não uma rejeição do JSON.
    pub service_kind: String,

    // Só o ramo incluído pelo tipo de serviço é lido
    #[serde(default)]
    pub direct_sound: Option<DirectSoundSpec>,

    #[serde(default)]
    pub post_production: Option<PostProductionSpec>,

    #[serde(default)]
    pub apply_tax: bool,

    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "discount_out_of_range"))]
    pub discount_pct: i64,

    #[serde(default)]
    pub quote_date: Option<String>,

    #[serde(default)]
    pub output_filename: Option<String>,
}

impl ServiceRequest {
    pub fn resolved_client_name(&self) -> &str {
        match self.client_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_CLIENT,
        }
    }
}

// --- Saída ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub duration_label: String,
    pub unit_price: i64,
    pub line_total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub client_name: String,
    pub quote_date: String,
    pub items: Vec<LineItem>,
    pub direct_sound_subtotal: i64,
    pub post_production_subtotal: i64,
    pub tax_applied: bool,
    pub tax_amount: i64,
    pub discount_pct: i64,
    pub discount_amount: i64,
    pub grand_total: i64,
}

impl QuoteResult {
    pub fn pre_tax_total(&self) -> i64 {
        self.direct_sound_subtotal + self.post_production_subtotal
    }
}
