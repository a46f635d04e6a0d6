use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("Tipo de serviço inválido: '{0}'. Valores aceitos: direct_sound, post_production, both")]
    InvalidServiceKind(String),

    #[error("A cotação não tem itens; nada para imprimir")]
    EmptyQuote,

    #[error("Valor grande demais para a cotação: {0}")]
    AmountOverflow(String),

    // O cálculo continua disponível em JSON, só o PDF fica indisponível.
    #[error("Geração de PDF indisponível: {0}")]
    RenderUnavailable(String),

    #[error("Falha ao gerar o PDF: {0}")]
    RenderFailed(#[from] genpdf::error::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidServiceKind(_)
            | AppError::EmptyQuote
            | AppError::AmountOverflow(_) => StatusCode::BAD_REQUEST,
            AppError::RenderUnavailable(_)
            | AppError::RenderFailed(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Nome do campo como aparece no JSON (discount_pct -> discountPct)
fn wire_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !name.is_empty();
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

// Achata os erros aninhados (directSound.days, postProduction.minutes...)
fn collect_details(
    prefix: &str,
    errors: &ValidationErrors,
    details: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            wire_name(field)
        } else {
            format!("{}.{}", prefix, wire_name(field))
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                details.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_details(&path, inner, details),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_details(&format!("{}[{}]", path, idx), inner, details);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::ValidationError(errors) = &self {
            let mut details = HashMap::new();
            collect_details("", errors, &mut details);
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let error_message = match &self {
            AppError::InternalServerError(_) => "Ocorreu um erro inesperado.".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
