// src/services/quote_service.rs

use chrono::{Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use validator::Validate;

use crate::{
    common::error::AppError,
    models::quote::{
        DirectSoundSpec, LineItem, MixFormat, PostProductionSpec, QuoteResult, RecorderTier,
        ServiceKind, ServiceRequest,
    },
};

// --- Tabela de preços (COP inteiros) ---
pub const PRICE_SHOTGUN: i64 = 150_000;
pub const PRICE_LAVALIER: i64 = 80_000;
pub const PRICE_MONITOR: i64 = 60_000;
pub const PRICE_TIMECODE: i64 = 40_000;
pub const PRICE_MIXPRE6: i64 = 150_000;
pub const PRICE_MIXPRE10: i64 = 200_000;
pub const PRICE_SOUND_ENGINEER: i64 = 400_000;
pub const PRICE_BOOM_OPERATOR: i64 = 250_000;
pub const PRICE_POST_STEREO: i64 = 300_000;
pub const PRICE_POST_5_1: i64 = 400_000;

/// IVA em pontos percentuais.
pub const TAX_RATE_PCT: i64 = 19;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Calcula a cotação usando a data local de hoje quando `quoteDate` não vem.
pub fn compute(request: &ServiceRequest) -> Result<QuoteResult, AppError> {
    compute_at(request, Local::now().date_naive())
}

/// Mesmo cálculo com o "hoje" explícito.
pub fn compute_at(request: &ServiceRequest, today: NaiveDate) -> Result<QuoteResult, AppError> {
    // 1. Validação (campos e tipo de serviço). Falha cedo, nada de cotação vazia.
    request.validate()?;
    let kind: ServiceKind = request
        .service_kind
        .parse()
        .map_err(|_| AppError::InvalidServiceKind(request.service_kind.clone()))?;

    // 2. Itens
    let mut items = Vec::new();
    let mut direct_sound_subtotal = 0;
    let mut post_production_subtotal = 0;

    // Ramos excluídos pelo tipo de serviço nem são lidos
    if kind.includes_direct_sound() {
        let spec = request.direct_sound.clone().unwrap_or_default();
        for item in direct_sound_items(&spec)? {
            direct_sound_subtotal = checked_sum(direct_sound_subtotal, item.line_total)?;
            items.push(item);
        }
    }

    if kind.includes_post_production() {
        let spec = request.post_production.clone().unwrap_or_default();
        if let Some(item) = post_production_item(&spec)? {
            post_production_subtotal = checked_sum(post_production_subtotal, item.line_total)?;
            items.push(item);
        }
    }

    // 3. Totais: IVA sobre o subtotal, desconto sobre o total com IVA
    let pre_tax_total = checked_sum(direct_sound_subtotal, post_production_subtotal)?;

    let tax_amount = if request.apply_tax {
        percent_of(pre_tax_total, TAX_RATE_PCT)?
    } else {
        0
    };
    let tax_inclusive_total = checked_sum(pre_tax_total, tax_amount)?;

    let discount_amount = if request.discount_pct != 0 {
        percent_of(tax_inclusive_total, request.discount_pct)?
    } else {
        0
    };

    let quote_date = match request.quote_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => today.format(DATE_FORMAT).to_string(),
    };

    Ok(QuoteResult {
        client_name: request.resolved_client_name().to_string(),
        quote_date,
        items,
        direct_sound_subtotal,
        post_production_subtotal,
        tax_applied: request.apply_tax,
        tax_amount,
        discount_pct: request.discount_pct,
        discount_amount,
        grand_total: tax_inclusive_total - discount_amount,
    })
}

fn line(
    description: &str,
    quantity: i64,
    duration_label: String,
    unit_price: i64,
    multiplier: i64,
) -> Result<LineItem, AppError> {
    let line_total = quantity
        .checked_mul(unit_price)
        .and_then(|v| v.checked_mul(multiplier))
        .ok_or_else(|| AppError::AmountOverflow(description.to_string()))?;

    Ok(LineItem {
        description: description.to_string(),
        quantity,
        duration_label,
        unit_price,
        line_total,
    })
}

fn checked_sum(a: i64, b: i64) -> Result<i64, AppError> {
    a.checked_add(b)
        .ok_or_else(|| AppError::AmountOverflow("total".to_string()))
}

fn days_label(days: i64) -> String {
    format!("{} días", days)
}

fn direct_sound_items(spec: &DirectSoundSpec) -> Result<Vec<LineItem>, AppError> {
    let mut items = Vec::new();
    let days = spec.days.max(0);

    // Equipamento e gravador só existem com dias de locação
    if days > 0 {
        let equipment = [
            ("Micrófono Shotgun", spec.shotgun_mic_count, PRICE_SHOTGUN),
            ("Sistemas inalámbricos Lavalier", spec.lavalier_count, PRICE_LAVALIER),
            ("Sistemas de Monitoreo", spec.monitor_count, PRICE_MONITOR),
            ("Sistemas Time Code", spec.timecode_count, PRICE_TIMECODE),
        ];
        for (description, count, unit_price) in equipment {
            if count > 0 {
                items.push(line(description, count, days_label(days), unit_price, days)?);
            }
        }

        let recorder = match RecorderTier::from_model(spec.recorder_model.as_deref()) {
            Some(RecorderTier::MixPre6) => Some(("Grabadora MixPre-6", PRICE_MIXPRE6)),
            Some(RecorderTier::MixPre10) => Some(("Grabadora MixPre-10", PRICE_MIXPRE10)),
            None => None,
        };
        if let Some((description, unit_price)) = recorder {
            items.push(line(description, 1, days_label(days), unit_price, days)?);
        }
    }

    // Equipe cobra no mínimo 1 diária, mesmo sem locação
    let professional_days = if days > 0 { days } else { 1 };
    if spec.has_sound_engineer {
        items.push(line(
            "Sonidista",
            1,
            days_label(professional_days),
            PRICE_SOUND_ENGINEER,
            professional_days,
        )?);
    }
    if spec.has_boom_operator {
        items.push(line(
            "Microfonista",
            1,
            days_label(professional_days),
            PRICE_BOOM_OPERATOR,
            professional_days,
        )?);
    }

    Ok(items)
}

fn post_production_item(spec: &PostProductionSpec) -> Result<Option<LineItem>, AppError> {
    let minutes = spec.minutes.max(0);
    if minutes == 0 {
        return Ok(None);
    }

    let (description, rate) = match MixFormat::from_label(spec.mix_format.as_deref()) {
        MixFormat::Stereo => ("Postproducción Estéreo", PRICE_POST_STEREO),
        MixFormat::Surround51 => ("Postproducción 5.1", PRICE_POST_5_1),
    };

    // Quantidade 1, os minutos entram como multiplicador
    line(description, 1, format!("{} min", minutes), rate, minutes).map(Some)
}

/// `round(amount * pct / 100)` exato, meio-para-par.
fn percent_of(amount: i64, pct: i64) -> Result<i64, AppError> {
    let value = Decimal::from(amount) * Decimal::from(pct) / Decimal::from(100);
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .ok_or_else(|| AppError::AmountOverflow(format!("{}% de {}", pct, amount)))
}
