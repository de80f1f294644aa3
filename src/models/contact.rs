// src/models/contact.rs

use serde::{Deserialize, Serialize};

/// Pessoa de contato de um cliente ou distribuidor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn from_columns(
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            name: name.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            email: email.unwrap_or_default(),
        }
    }
}

// Vale para clientes e distribuidores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Ativo,
    Inativo,
}

impl RecordStatus {
    pub const VALUES: [&'static str; 2] = ["ativo", "inativo"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Ativo => "ativo",
            RecordStatus::Inativo => "inativo",
        }
    }

    /// Valor desconhecido ou ausente cai no padrão (`ativo`).
    pub fn from_column(value: Option<&str>) -> Self {
        match value {
            Some("inativo") => RecordStatus::Inativo,
            _ => RecordStatus::Ativo,
        }
    }
}
