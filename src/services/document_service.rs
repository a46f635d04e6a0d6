// src/services/document_service.rs

use std::path::Path;

use genpdf::{
    elements, fonts, render,
    style::{self, Color},
    Alignment, Context, Element, Margins, Mm, Position, RenderResult, Scale,
};

use crate::{
    common::{error::AppError, format::money},
    models::quote::QuoteResult,
    services::{
        assets::{Asset, AssetSource},
        quote_service::TAX_RATE_PCT,
    },
};

// --- Identidade fixa da empresa ---
pub const COMPANY_NAME: &str = "48 VOLTIOS S.A.S";
pub const COMPANY_TAX_ID: &str = "NIT. 901641620-5";
pub const COMPANY_TAGLINE: &str = "Sonido Directo y Postproducción de Sonido";
pub const COMPANY_CONTACT: &str = "Contacto: 48voltios.info@gmail.com | Tel: +57 318 377 2397";

pub const SIGNER_NAME: &str = "JORGE BAHAMÓN";
pub const SIGNER_TITLE: &str = "Productor de Audio";
pub const SIGNER_CONTACT: &str = "Contacto: +57 318 377 2397";
pub const SIGNATURE_PLACEHOLDER: &str = "(firma no disponible)";

const HEADER_COLOR: Color = Color::Rgb(0x4A, 0xD3, 0x95);
const TABLE_HEADERS: [&str; 5] = [
    "Descripción",
    "Cantidad",
    "Días/Min",
    "Valor Unitario",
    "Subtotal",
];
const COLUMN_WEIGHTS: [usize; 5] = [20, 6, 7, 10, 10];

// Tamanho final das imagens, em pontos
const LOGO_SIZE_PT: (f64, f64) = (120.0, 60.0);
const SIGNATURE_SIZE_PT: (f64, f64) = (140.0, 80.0);

/// Fonte padrão quando `FONT_FAMILY` não é informada.
pub const DEFAULT_FONT_FAMILY: &str = "Roboto";

enum Capability {
    Available(fonts::FontFamily<fonts::FontData>),
    Unavailable(String),
}

/// Gera o PDF da cotação. A disponibilidade (fontes carregadas) é decidida
/// na construção; `render` só consulta o estado.
pub struct QuoteRenderer {
    capability: Capability,
}

impl QuoteRenderer {
    /// Carrega `<family>-Regular.ttf`, `-Bold`, `-Italic` e `-BoldItalic` de `dir`.
    pub fn from_font_dir(dir: impl AsRef<Path>, family: &str) -> Self {
        let dir = dir.as_ref();
        match fonts::from_files(dir, family, None) {
            Ok(font_family) => {
                tracing::info!("✅ Fontes '{}' carregadas de {}", family, dir.display());
                Self {
                    capability: Capability::Available(font_family),
                }
            }
            Err(e) => {
                let reason = format!(
                    "fonte '{}' não encontrada em {} ({}). Instale os arquivos {}-Regular.ttf, {}-Bold.ttf, {}-Italic.ttf e {}-BoldItalic.ttf",
                    family,
                    dir.display(),
                    e,
                    family,
                    family,
                    family,
                    family
                );
                tracing::warn!("⚠️ PDF desabilitado: {}", reason);
                Self::unavailable(reason)
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            capability: Capability::Unavailable(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.capability, Capability::Available(_))
    }

    pub fn render(
        &self,
        result: &QuoteResult,
        assets: &dyn AssetSource,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Pré-condições
        if result.items.is_empty() {
            return Err(AppError::EmptyQuote);
        }
        let font_family = match &self.capability {
            Capability::Available(family) => family.clone(),
            Capability::Unavailable(reason) => {
                return Err(AppError::RenderUnavailable(reason.clone()));
            }
        };

        // 2. Documento
        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Cotización {}", result.client_name));
        doc.set_paper_size(genpdf::PaperSize::Letter);
        doc.set_font_size(10);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(header(result, load_image(assets, Asset::Logo, LOGO_SIZE_PT))?);
        doc.push(elements::Break::new(1.5));
        doc.push(elements::Paragraph::new("COTIZACIÓN DETALLADA")
            .styled(style::Style::new().bold().with_font_size(14)));
        doc.push(elements::Break::new(1.5));

        // --- TABELA ---
        doc.push(items_table(result)?);

        // --- ASSINATURA ---
        doc.push(elements::Break::new(2));
        doc.push(closing(load_image(assets, Asset::Signature, SIGNATURE_SIZE_PT)));

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)?;

        Ok(buffer)
    }
}

/// Linhas de resumo na ordem do PDF: subtotais, IVA (se houver), desconto (se houver), total.
pub fn summary_rows(result: &QuoteResult) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Subtotal Sonido Directo".to_string(), money(result.direct_sound_subtotal)),
        ("Subtotal Postproducción".to_string(), money(result.post_production_subtotal)),
    ];
    if result.tax_applied && result.tax_amount != 0 {
        rows.push((format!("IVA ({}%)", TAX_RATE_PCT), money(result.tax_amount)));
    }
    if result.discount_pct != 0 && result.discount_amount != 0 {
        rows.push((
            format!("Descuento ({}%)", result.discount_pct),
            money(-result.discount_amount),
        ));
    }
    rows.push(("TOTAL".to_string(), money(result.grand_total)));
    rows
}

fn aligned(text: impl Into<String>, alignment: Alignment) -> elements::Paragraph {
    let mut paragraph = elements::Paragraph::new(text.into());
    paragraph.set_alignment(alignment);
    paragraph
}

fn header(
    result: &QuoteResult,
    logo: Option<elements::Image>,
) -> Result<elements::TableLayout, AppError> {
    let bold = style::Style::new().bold();

    let mut logo_cell = elements::LinearLayout::vertical();
    match logo {
        Some(image) => logo_cell.push(image),
        None => logo_cell.push(elements::Paragraph::new("")),
    }

    let mut info = elements::LinearLayout::vertical();
    info.push(aligned(COMPANY_NAME, Alignment::Right).styled(bold));
    info.push(aligned(COMPANY_TAX_ID, Alignment::Right).styled(bold));
    info.push(aligned(COMPANY_TAGLINE, Alignment::Right));
    info.push(aligned(COMPANY_CONTACT, Alignment::Right));
    info.push(elements::Break::new(1));
    info.push(aligned(format!("Cliente: {}", result.client_name), Alignment::Right));
    info.push(aligned(format!("Fecha: {}", result.quote_date), Alignment::Right));

    let mut table = elements::TableLayout::new(vec![13, 36]);
    table.row()
        .element(logo_cell.padded(Margins::all(2)))
        .element(info.padded(Margins::all(2)))
        .push()?;

    Ok(table)
}

fn items_table(result: &QuoteResult) -> Result<elements::TableLayout, AppError> {
    let mut table = elements::TableLayout::new(COLUMN_WEIGHTS.to_vec());
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    // Header: fundo verde, texto branco em negrito
    let header_style = style::Style::new().bold().with_color(Color::Rgb(255, 255, 255));
    let mut row = table.row();
    for title in TABLE_HEADERS {
        row = row.element(ShadedCell::new(
            aligned(title, Alignment::Center).styled(header_style),
            HEADER_COLOR,
        ));
    }
    row.push()?;

    for item in &result.items {
        table.row()
            .element(elements::Paragraph::new(item.description.as_str()).padded(1))
            .element(aligned(item.quantity.to_string(), Alignment::Center).padded(1))
            .element(aligned(item.duration_label.as_str(), Alignment::Center).padded(1))
            .element(aligned(money(item.unit_price), Alignment::Center).padded(1))
            .element(aligned(money(item.line_total), Alignment::Center).padded(1))
            .push()?;
    }

    let rows = summary_rows(result);
    let last = rows.len() - 1;
    for (idx, (label, value)) in rows.into_iter().enumerate() {
        let emphasis = if idx == last {
            style::Style::new().bold()
        } else {
            style::Style::new()
        };
        table.row()
            .element(elements::Paragraph::new(""))
            .element(elements::Paragraph::new(""))
            .element(elements::Paragraph::new(""))
            .element(aligned(label, Alignment::Center).styled(emphasis).padded(1))
            .element(aligned(value, Alignment::Center).styled(emphasis).padded(1))
            .push()?;
    }

    Ok(table)
}

fn closing(signature: Option<elements::Image>) -> elements::LinearLayout {
    let mut block = elements::LinearLayout::vertical();
    block.push(elements::Paragraph::new("Cordialmente,"));
    block.push(elements::Break::new(1));
    match signature {
        Some(image) => block.push(image),
        None => block.push(elements::Paragraph::new(SIGNATURE_PLACEHOLDER)),
    }
    block.push(elements::Break::new(0.5));
    block.push(elements::Paragraph::new(SIGNER_NAME).styled(style::Style::new().bold()));
    block.push(elements::Paragraph::new(SIGNER_TITLE));
    block.push(elements::Paragraph::new(SIGNER_CONTACT));
    block
}

// Imagem ausente ou ilegível vira `None` (placeholder no PDF), nunca erro.
fn load_image(
    assets: &dyn AssetSource,
    asset: Asset,
    size_pt: (f64, f64),
) -> Option<elements::Image> {
    let bytes = assets.fetch(asset)?;
    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!("Imagem {:?} ilegível, usando placeholder: {}", asset, e);
            return None;
        }
    };

    // genpdf não aceita canal alfa
    let rgb = decoded.to_rgb8();
    let (width_px, height_px) = rgb.dimensions();
    if width_px == 0 || height_px == 0 {
        return None;
    }

    match elements::Image::from_dynamic_image(image::DynamicImage::ImageRgb8(rgb)) {
        Ok(img) => Some(
            img.with_alignment(Alignment::Left)
                .with_scale({
                    let (x, y) = fit_scale(width_px, height_px, size_pt);
                    Scale::new(x, y)
                }),
        ),
        Err(e) => {
            tracing::warn!("Imagem {:?} rejeitada pelo gerador de PDF: {}", asset, e);
            None
        }
    }
}

// genpdf usa 300 dpi por padrão; calcula a escala para o tamanho alvo em pontos.
fn fit_scale(width_px: u32, height_px: u32, (width_pt, height_pt): (f64, f64)) -> (f64, f64) {
    const DPI: f64 = 300.0;
    let natural_w_pt = f64::from(width_px) * 72.0 / DPI;
    let natural_h_pt = f64::from(height_px) * 72.0 / DPI;
    (width_pt / natural_w_pt, height_pt / natural_h_pt)
}

// Distância entre as linhas finas que formam a faixa de fundo
const SHADE_STEP_MM: f64 = 0.2;

/// Célula com faixa de fundo colorida atrás do conteúdo. genpdf não preenche
/// retângulos nem controla a espessura do traço, então a faixa é feita de
/// linhas finas empilhadas.
struct ShadedCell<E: Element> {
    inner: E,
    color: Color,
    padding: Mm,
}

impl<E: Element> ShadedCell<E> {
    fn new(inner: E, color: Color) -> Self {
        Self {
            inner,
            color,
            padding: Mm::from(1.0),
        }
    }
}

impl<E: Element> Element for ShadedCell<E> {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: style::Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        let band = style.line_height(&context.font_cache) + self.padding * 2.0;
        let width = area.size().width;
        let stroke = style::Style::new().with_color(self.color);

        let mut y = Mm::from(0.0);
        while y <= band {
            area.draw_line(vec![Position::new(0, y), Position::new(width, y)], stroke);
            y = y + Mm::from(SHADE_STEP_MM);
        }

        let mut inner_area = area.clone();
        inner_area.add_margins(Margins::all(self.padding));
        let mut result = self.inner.render(context, inner_area, style)?;
        result.size.width = width;
        result.size.height = result.size.height + self.padding * 2.0;
        Ok(result)
    }
}
