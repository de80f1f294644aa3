// src/common/sanitize.rs

// Saneamento das entradas de escrita.
// Os handlers chamam estas funções ANTES de qualquer coisa chegar ao banco.

use validator::ValidateEmail;

use crate::common::error::AppError;

pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Como tratar aspas num texto livre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// Aspas curvas e duplas viram aspas simples retas.
    Normalize,
    /// Qualquer aspa é rejeitada.
    Reject,
}

const QUOTE_CHARS: [char; 6] = ['"', '\'', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

pub fn sanitize_text(
    field: &'static str,
    value: &str,
    mode: QuoteMode,
    max_len: usize,
) -> Result<String, AppError> {
    if mode == QuoteMode::Reject && value.contains(QUOTE_CHARS) {
        return Err(AppError::invalid(field, "aspas não são permitidas"));
    }

    // Controles (inclui \n, \r, \t) viram espaço
    let mut text: String = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    text = text
        .replace("--", "\u{2014}")
        .replace(';', ",")
        .replace("/*", "")
        .replace("*/", "")
        .replace('\\', "");

    if mode == QuoteMode::Normalize {
        text = text
            .chars()
            .map(|c| if QUOTE_CHARS.contains(&c) { '\'' } else { c })
            .collect();
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(collapsed.chars().take(max_len).collect())
}

/// Texto obrigatório: depois de saneado não pode ficar vazio.
pub fn sanitize_required(
    field: &'static str,
    value: &str,
    mode: QuoteMode,
    max_len: usize,
) -> Result<String, AppError> {
    let clean = sanitize_text(field, value, mode, max_len)?;
    if clean.is_empty() {
        return Err(AppError::invalid(field, "campo obrigatório"));
    }
    Ok(clean)
}

/// Texto opcional: vazio depois do saneamento vira `None`.
pub fn sanitize_optional(
    field: &'static str,
    value: Option<&str>,
    mode: QuoteMode,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let clean = sanitize_text(field, raw, mode, max_len)?;
            Ok((!clean.is_empty()).then_some(clean))
        }
    }
}

pub fn sanitize_email(value: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return Ok(None);
    }
    if !lowered.validate_email() {
        return Err(AppError::invalid("email", "formato de e-mail inválido"));
    }
    Ok(Some(lowered))
}

pub fn sanitize_non_negative_number(field: &'static str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() {
        return Err(AppError::invalid(field, "valor numérico inválido"));
    }
    if value < 0.0 {
        return Err(AppError::invalid(field, "o valor não pode ser negativo"));
    }
    Ok(value)
}

pub fn sanitize_non_negative_int(field: &'static str, value: f64) -> Result<i64, AppError> {
    let value = sanitize_non_negative_number(field, value)?;
    if value.fract() != 0.0 {
        return Err(AppError::invalid(field, "o valor deve ser inteiro"));
    }
    if value > i64::MAX as f64 {
        return Err(AppError::invalid(field, "valor fora do intervalo"));
    }
    Ok(value as i64)
}

/// Restringe o valor a um conjunto fechado.
pub fn sanitize_enum<'a>(
    field: &'static str,
    value: &str,
    allowed: &[&'a str],
) -> Result<&'a str, AppError> {
    let needle = value.trim();
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == needle)
        .ok_or_else(|| {
            AppError::invalid(field, format!("valor deve ser um de: {}", allowed.join(", ")))
        })
}

/// Lista de cidades vinda como JSON (`["Recife", "Olinda"]`).
pub fn sanitize_cities_json(raw: &str, max_len: usize) -> Result<Vec<String>, AppError> {
    let parsed: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| AppError::invalid("cities", "lista de cidades inválida"))?;
    sanitize_cities(&parsed, max_len)
}

pub fn sanitize_cities(cities: &[String], max_len: usize) -> Result<Vec<String>, AppError> {
    let mut clean = Vec::with_capacity(cities.len());
    for city in cities {
        let city = sanitize_text("cities", city, QuoteMode::Normalize, max_len)?;
        if !city.is_empty() {
            clean.push(city);
        }
    }
    Ok(clean)
}
