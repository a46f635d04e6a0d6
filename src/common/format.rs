// src/common/format.rs

/// Formata pesos inteiros no padrão da cotação: `$1,500,000`.
pub fn money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn sanitize(raw: &str, keep: impl Fn(char) -> bool) -> String {
    raw.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || keep(ch) { ch } else { '_' })
        .collect()
}

/// Nome do arquivo PDF: o sugerido pelo cliente (limpo) ou `cotizacion_<cliente>.pdf`.
pub fn pdf_filename(hint: Option<&str>, client_name: &str) -> String {
    match hint.map(str::trim) {
        Some(h) if !h.is_empty() => {
            let name = sanitize(h, |c| matches!(c, '_' | '-' | '.'));
            if name.to_lowercase().ends_with(".pdf") {
                name
            } else {
                format!("{}.pdf", name)
            }
        }
        _ => format!(
            "cotizacion_{}.pdf",
            sanitize(client_name, |c| matches!(c, '_' | '-'))
        ),
    }
}
