// src/models/company.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::contact::{Contact, RecordStatus};

// --- LINHA CRUA (como vem da tabela `companies`) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct RawCompany {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub stores: Option<i64>,
    pub stores_by_state_json: Option<String>,
    pub total_value: Option<f64>,
    pub status: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

// --- CLIENTE (registro de domínio) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub company_type: String,
    pub stores: i64,
    /// Lojas por UF (`{"PE": 3, "PB": 1}`). `None` quando não informado.
    pub stores_by_state: Option<BTreeMap<String, i64>>,
    pub total_value: f64,
    pub status: RecordStatus,
    pub contact: Contact,
}

/// Dados de criação vindos do formulário.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    #[serde(rename = "type")]
    pub company_type: String,
    pub stores: i64,
    pub stores_by_state: Option<BTreeMap<String, i64>>,
    pub total_value: f64,
    pub status: RecordStatus,
    pub contact: Contact,
}

/// Edição parcial: só os campos presentes sobrescrevem o registro atual.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub company_type: Option<String>,
    pub stores: Option<i64>,
    pub stores_by_state: Option<Option<BTreeMap<String, i64>>>,
    pub total_value: Option<f64>,
    pub status: Option<RecordStatus>,
    pub contact: Option<Contact>,
}

impl Company {
    pub fn from_input(id: i64, input: CompanyInput) -> Self {
        Self {
            id,
            name: input.name,
            company_type: input.company_type,
            stores: input.stores,
            stores_by_state: input.stores_by_state,
            total_value: input.total_value,
            status: input.status,
            contact: input.contact,
        }
    }

    /// Aplica a edição por cima do registro existente (o `id` nunca muda).
    pub fn merged(&self, update: CompanyUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.unwrap_or_else(|| self.name.clone()),
            company_type: update.company_type.unwrap_or_else(|| self.company_type.clone()),
            stores: update.stores.unwrap_or(self.stores),
            stores_by_state: update
                .stores_by_state
                .unwrap_or_else(|| self.stores_by_state.clone()),
            total_value: update.total_value.unwrap_or(self.total_value),
            status: update.status.unwrap_or(self.status),
            contact: update.contact.unwrap_or_else(|| self.contact.clone()),
        }
    }

    /// Formato de escrita aceito pela persistência.
    pub fn to_payload(&self, with_id: bool) -> CompanyPayload {
        CompanyPayload {
            id: with_id.then_some(self.id),
            name: self.name.clone(),
            company_type: Some(self.company_type.clone()),
            stores: Some(self.stores as f64),
            stores_by_state_json: self
                .stores_by_state
                .as_ref()
                .and_then(|map| serde_json::to_string(map).ok()),
            total_value: Some(self.total_value),
            status: Some(self.status.as_str().to_string()),
            contact_name: Some(self.contact.name.clone()),
            contact_phone: Some(self.contact.phone.clone()),
            contact_email: Some(self.contact.email.clone()),
        }
    }
}

// --- PAYLOAD DE ESCRITA (entrada da persistência) ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompanyPayload {
    pub id: Option<i64>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(rename = "type")]
    pub company_type: Option<String>,

    // Números chegam como f64 e são checados no saneamento
    pub stores: Option<f64>,
    pub stores_by_state_json: Option<String>,
    pub total_value: Option<f64>,
    pub status: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}
