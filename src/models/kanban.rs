// src/models/kanban.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// As três etapas fixas do processamento de recibos.
// No banco é TEXT: "recebimento", "relatorio", "nota_fiscal".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Recebimento,
    Relatorio,
    NotaFiscal,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Recebimento, Stage::Relatorio, Stage::NotaFiscal];
    pub const VALUES: [&'static str; 3] = ["recebimento", "relatorio", "nota_fiscal"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Recebimento => "recebimento",
            Stage::Relatorio => "relatorio",
            Stage::NotaFiscal => "nota_fiscal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Stage::ALL.into_iter().find(|stage| stage.as_str() == value)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RawKanbanItem {
    pub company: String,
    pub stage: Stage,
    pub receipts: i64,
    pub total: i64,
}

/// Um par (cliente, etapa). A chave natural é `"{company}:{stage}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanItem {
    pub key: String,
    pub company: String,
    pub stage: Stage,
    pub receipts: i64,
    pub total: i64,
}

impl KanbanItem {
    pub fn key_for(company: &str, stage: Stage) -> String {
        format!("{}:{}", company, stage.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct KanbanPayload {
    #[validate(length(min = 1, message = "O cliente é obrigatório."))]
    pub company: String,
    pub stage: String,
    pub receipts: f64,
    pub total: f64,
}

impl KanbanPayload {
    pub fn new(company: &str, stage: Stage, receipts: i64, total: i64) -> Self {
        Self {
            company: company.to_string(),
            stage: stage.as_str().to_string(),
            receipts: receipts as f64,
            total: total as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_round_trip_through_parse() {
        for stage in Stage::ALL {
            assert_eq!(Stage::parse(stage.as_str()), Some(stage));
        }
        assert_eq!(Stage::parse("arquivado"), None);
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::NotaFiscal).unwrap();
        assert_eq!(json, "\"nota_fiscal\"");
    }

    #[test]
    fn key_joins_company_and_stage() {
        assert_eq!(KanbanItem::key_for("Acme", Stage::Relatorio), "Acme:relatorio");
    }
}
