// src/handlers/partners.rs

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        sanitize::{
            QuoteMode, sanitize_cities_json, sanitize_email, sanitize_enum, sanitize_optional,
            sanitize_required,
        },
    },
    db::partner_repo::PartnerRow,
    models::{
        contact::RecordStatus,
        partner::{PartnerPayload, ReceiptsStatus},
    },
};

pub fn sanitize_partner(payload: &PartnerPayload, max_len: usize) -> Result<PartnerRow, AppError> {
    payload.validate()?;

    let cities = match payload.cities_json.as_deref() {
        Some(raw) if !raw.trim().is_empty() => sanitize_cities_json(raw, max_len)?,
        _ => Vec::new(),
    };
    let cities_json = serde_json::to_string(&cities).map_err(anyhow::Error::from)?;

    let status = match payload.status.as_deref() {
        Some(value) => sanitize_enum("status", value, &RecordStatus::VALUES)?,
        None => RecordStatus::Ativo.as_str(),
    };
    let receipts_status = match payload.receipts_status.as_deref() {
        Some(value) => sanitize_enum("receipts_status", value, &ReceiptsStatus::VALUES)?,
        None => ReceiptsStatus::Pendente.as_str(),
    };

    Ok(PartnerRow {
        name: sanitize_required("name", &payload.name, QuoteMode::Normalize, max_len)?,
        region: sanitize_optional(
            "region",
            payload.region.as_deref(),
            QuoteMode::Normalize,
            max_len,
        )?,
        cities_json,
        contact_name: sanitize_optional(
            "contact_name",
            payload.contact_name.as_deref(),
            QuoteMode::Normalize,
            max_len,
        )?,
        contact_phone: sanitize_optional(
            "contact_phone",
            payload.contact_phone.as_deref(),
            QuoteMode::Reject,
            max_len,
        )?,
        contact_email: sanitize_email(payload.contact_email.as_deref())?,
        status: status.to_string(),
        receipts_status: receipts_status.to_string(),
    })
}
