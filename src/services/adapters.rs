// src/services/adapters.rs

// Linha crua -> registro de domínio. Nenhuma função aqui falha: um campo
// malformado vira um valor padrão seguro em vez de derrubar a listagem.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::{
    company::{Company, RawCompany},
    contact::{Contact, RecordStatus},
    kanban::{KanbanItem, RawKanbanItem},
    partner::{Partner, RawPartner, ReceiptsStatus},
};

pub fn adapt_company(raw: RawCompany) -> Company {
    let stores_by_state = raw
        .stores_by_state_json
        .as_deref()
        .and_then(parse_stores_by_state);

    Company {
        id: raw.id,
        name: raw.name,
        company_type: raw.company_type.unwrap_or_default(),
        stores: raw.stores.unwrap_or(0),
        stores_by_state,
        total_value: raw.total_value.filter(|v| v.is_finite()).unwrap_or(0.0),
        status: RecordStatus::from_column(raw.status.as_deref()),
        contact: Contact::from_columns(raw.contact_name, raw.contact_phone, raw.contact_email),
    }
}

pub fn adapt_partner(raw: RawPartner) -> Partner {
    Partner {
        id: raw.id,
        name: raw.name,
        region: raw.region.unwrap_or_default(),
        cities: raw.cities_json.as_deref().map(parse_cities).unwrap_or_default(),
        contact: Contact::from_columns(raw.contact_name, raw.contact_phone, raw.contact_email),
        status: RecordStatus::from_column(raw.status.as_deref()),
        receipts_status: ReceiptsStatus::from_column(raw.receipts_status.as_deref()),
    }
}

// `receipts`/`total` passam direto; quem escreve valida antes.
pub fn adapt_kanban_item(raw: RawKanbanItem) -> KanbanItem {
    KanbanItem {
        key: KanbanItem::key_for(&raw.company, raw.stage),
        company: raw.company,
        stage: raw.stage,
        receipts: raw.receipts,
        total: raw.total,
    }
}

/// `None` se o JSON é inválido, não é objeto, ou não sobra nenhuma UF.
pub fn parse_stores_by_state(raw: &str) -> Option<BTreeMap<String, i64>> {
    let Ok(Value::Object(entries)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };

    let parsed: BTreeMap<String, i64> = entries
        .into_iter()
        .filter_map(|(state, value)| {
            let count = coerce_number(&value)?;
            // Trunca em direção a zero
            Some((state, count.trunc() as i64))
        })
        .collect();

    (!parsed.is_empty()).then_some(parsed)
}

// Mesma ideia de `Number(value)`: números, strings numéricas e booleanos.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

pub fn parse_cities(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::debug!("cities_json inválido, usando lista vazia: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::kanban::Stage;

    fn raw_company() -> RawCompany {
        RawCompany {
            id: 7,
            name: "Acme".into(),
            ..Default::default()
        }
    }

    #[test]
    fn company_defaults_null_columns() {
        let company = adapt_company(raw_company());
        assert_eq!(company.company_type, "");
        assert_eq!(company.stores, 0);
        assert_eq!(company.total_value, 0.0);
        assert_eq!(company.status, RecordStatus::Ativo);
        assert_eq!(company.stores_by_state, None);
        assert_eq!(company.contact, Contact::default());
    }

    #[test]
    fn malformed_stores_by_state_becomes_none() {
        let mut raw = raw_company();
        raw.stores_by_state_json = Some("not-json".into());
        assert_eq!(adapt_company(raw).stores_by_state, None);

        assert_eq!(parse_stores_by_state("[1, 2]"), None);
        assert_eq!(parse_stores_by_state("{}"), None);
        assert_eq!(parse_stores_by_state(r#"{"PE": "abc"}"#), None);
    }

    #[test]
    fn stores_by_state_truncates_and_drops_non_finite() {
        let parsed = parse_stores_by_state(r#"{"PE": 3.9, "PB": "2", "AL": "x", "RN": -1.5}"#)
            .unwrap();
        assert_eq!(parsed.get("PE"), Some(&3));
        assert_eq!(parsed.get("PB"), Some(&2));
        assert_eq!(parsed.get("RN"), Some(&-1));
        assert!(!parsed.contains_key("AL"));
    }

    #[test]
    fn malformed_cities_become_empty_list() {
        let raw = RawPartner {
            id: 1,
            name: "Norte".into(),
            cities_json: Some("oops".into()),
            ..Default::default()
        };
        let partner = adapt_partner(raw);
        assert!(partner.cities.is_empty());
        assert_eq!(partner.receipts_status, ReceiptsStatus::Pendente);

        assert!(parse_cities(r#"{"a": 1}"#).is_empty());
        assert_eq!(parse_cities(r#"["Recife", "Recife"]"#), vec!["Recife", "Recife"]);
    }

    #[test]
    fn null_cities_are_skipped() {
        assert_eq!(parse_cities(r#"["Recife", null, 42]"#), vec!["Recife", "42"]);
        assert!(parse_cities("[null]").is_empty());
    }

    #[test]
    fn kanban_key_is_company_and_stage() {
        let item = adapt_kanban_item(RawKanbanItem {
            company: "X".into(),
            stage: Stage::NotaFiscal,
            receipts: 12,
            total: 3,
        });
        assert_eq!(item.key, "X:nota_fiscal");
        // Sem guarda aqui: receipts > total passa adiante
        assert_eq!((item.receipts, item.total), (12, 3));
    }
}
