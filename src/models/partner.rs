// src/models/partner.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::contact::{Contact, RecordStatus};

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct RawPartner {
    pub id: i64,
    pub name: String,
    pub region: Option<String>,
    pub cities_json: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: Option<String>,
    pub receipts_status: Option<String>,
}

/// Situação dos recibos que o distribuidor deve enviar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptsStatus {
    Enviado,
    #[default]
    Pendente,
}

impl ReceiptsStatus {
    pub const VALUES: [&'static str; 2] = ["enviado", "pendente"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptsStatus::Enviado => "enviado",
            ReceiptsStatus::Pendente => "pendente",
        }
    }

    pub fn from_column(value: Option<&str>) -> Self {
        match value {
            Some("enviado") => ReceiptsStatus::Enviado,
            _ => ReceiptsStatus::Pendente,
        }
    }
}

// --- DISTRIBUIDOR ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub region: String,
    // Ordem preservada, duplicadas permitidas
    pub cities: Vec<String>,
    pub contact: Contact,
    pub status: RecordStatus,
    pub receipts_status: ReceiptsStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInput {
    pub name: String,
    pub region: String,
    pub cities: Vec<String>,
    pub contact: Contact,
    pub status: RecordStatus,
    pub receipts_status: ReceiptsStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUpdate {
    pub name: Option<String>,
    pub region: Option<String>,
    pub cities: Option<Vec<String>>,
    pub contact: Option<Contact>,
    pub status: Option<RecordStatus>,
    pub receipts_status: Option<ReceiptsStatus>,
}

impl Partner {
    pub fn from_input(id: i64, input: PartnerInput) -> Self {
        Self {
            id,
            name: input.name,
            region: input.region,
            cities: input.cities,
            contact: input.contact,
            status: input.status,
            receipts_status: input.receipts_status,
        }
    }

    pub fn merged(&self, update: PartnerUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.unwrap_or_else(|| self.name.clone()),
            region: update.region.unwrap_or_else(|| self.region.clone()),
            cities: update.cities.unwrap_or_else(|| self.cities.clone()),
            contact: update.contact.unwrap_or_else(|| self.contact.clone()),
            status: update.status.unwrap_or(self.status),
            receipts_status: update.receipts_status.unwrap_or(self.receipts_status),
        }
    }

    /// As cidades vão serializadas como JSON para a persistência.
    pub fn to_payload(&self, with_id: bool) -> PartnerPayload {
        PartnerPayload {
            id: with_id.then_some(self.id),
            name: self.name.clone(),
            region: Some(self.region.clone()),
            cities_json: serde_json::to_string(&self.cities).ok(),
            contact_name: Some(self.contact.name.clone()),
            contact_phone: Some(self.contact.phone.clone()),
            contact_email: Some(self.contact.email.clone()),
            status: Some(self.status.as_str().to_string()),
            receipts_status: Some(self.receipts_status.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PartnerPayload {
    pub id: Option<i64>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub region: Option<String>,
    pub cities_json: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: Option<String>,
    pub receipts_status: Option<String>,
}
