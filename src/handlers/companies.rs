// src/handlers/companies.rs

use std::collections::BTreeMap;

use serde_json::Value;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        sanitize::{
            QuoteMode, sanitize_email, sanitize_enum, sanitize_non_negative_int,
            sanitize_non_negative_number, sanitize_optional, sanitize_required, sanitize_text,
        },
    },
    db::company_repo::CompanyRow,
    models::{company::CompanyPayload, contact::RecordStatus},
};

/// Valida e saneia o payload de cliente. Nada chega ao banco sem passar aqui.
pub fn sanitize_company(payload: &CompanyPayload, max_len: usize) -> Result<CompanyRow, AppError> {
    payload.validate()?;

    let stores = match payload.stores {
        Some(value) => sanitize_non_negative_int("stores", value)?,
        None => 0,
    };
    let total_value = match payload.total_value {
        Some(value) => sanitize_non_negative_number("total_value", value)?,
        None => 0.0,
    };
    let status = match payload.status.as_deref() {
        Some(value) => sanitize_enum("status", value, &RecordStatus::VALUES)?,
        None => RecordStatus::Ativo.as_str(),
    };
    let stores_by_state_json = match payload.stores_by_state_json.as_deref() {
        Some(raw) => sanitize_stores_by_state(raw, max_len)?,
        None => None,
    };

    Ok(CompanyRow {
        name: sanitize_required("name", &payload.name, QuoteMode::Normalize, max_len)?,
        company_type: sanitize_optional(
            "type",
            payload.company_type.as_deref(),
            QuoteMode::Normalize,
            max_len,
        )?,
        stores,
        stores_by_state_json,
        total_value,
        status: status.to_string(),
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
    })
}

// `{"PE": 3, "PB": 1}` -> mesmas chaves saneadas, contagens inteiras >= 0.
// Objeto vazio é gravado como NULL.
fn sanitize_stores_by_state(raw: &str, max_len: usize) -> Result<Option<String>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|_| AppError::invalid("stores_by_state_json", "JSON inválido"))?;
    let Value::Object(entries) = parsed else {
        return Err(AppError::invalid(
            "stores_by_state_json",
            "esperado um objeto UF -> lojas",
        ));
    };

    let mut clean = BTreeMap::new();
    for (state, count) in entries {
        let state = sanitize_text("stores_by_state_json", &state, QuoteMode::Reject, max_len)?;
        let count = count
            .as_f64()
            .ok_or_else(|| AppError::invalid("stores_by_state_json", "contagem não numérica"))?;
        let count = sanitize_non_negative_int("stores_by_state_json", count)?;
        if !state.is_empty() {
            clean.insert(state, count);
        }
    }

    if clean.is_empty() {
        return Ok(None);
    }
    let json = serde_json::to_string(&clean).map_err(anyhow::Error::from)?;
    Ok(Some(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str) -> CompanyPayload {
        CompanyPayload {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_missing_fields() {
        let row = sanitize_company(&payload("Água Clara"), 255).unwrap();
        assert_eq!(row.name, "Água Clara");
        assert_eq!(row.stores, 0);
        assert_eq!(row.total_value, 0.0);
        assert_eq!(row.status, "ativo");
        assert_eq!(row.stores_by_state_json, None);
    }

    #[test]
    fn rejects_empty_name_before_storage() {
        let err = sanitize_company(&payload(""), 255).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_status_and_negative_numbers() {
        let mut bad = payload("Acme");
        bad.status = Some("suspenso".into());
        assert!(sanitize_company(&bad, 255).is_err());

        let mut bad = payload("Acme");
        bad.stores = Some(-2.0);
        assert!(matches!(
            sanitize_company(&bad, 255),
            Err(AppError::InvalidField { field: "stores", .. })
        ));
    }

    #[test]
    fn normalizes_stores_by_state() {
        let mut p = payload("Acme");
        p.stores_by_state_json = Some(r#"{"PE": 3, "PB": 1}"#.into());
        let row = sanitize_company(&p, 255).unwrap();
        assert_eq!(row.stores_by_state_json.as_deref(), Some(r#"{"PB":1,"PE":3}"#));

        p.stores_by_state_json = Some("{}".into());
        assert_eq!(sanitize_company(&p, 255).unwrap().stores_by_state_json, None);

        p.stores_by_state_json = Some("[1,2]".into());
        assert!(sanitize_company(&p, 255).is_err());
    }

    #[test]
    fn lowercases_contact_email() {
        let mut p = payload("Acme");
        p.contact_email = Some("Compras@Acme.COM".into());
        let row = sanitize_company(&p, 255).unwrap();
        assert_eq!(row.contact_email.as_deref(), Some("compras@acme.com"));
    }
}
