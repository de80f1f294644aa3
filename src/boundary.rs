// src/boundary.rs

// Contrato CRUD que a store consome. A implementação real (SQLite) fica em
// `handlers::SqlBoundary`; nos testes entra um dublê em memória.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    models::{
        company::{CompanyPayload, RawCompany},
        kanban::{KanbanPayload, RawKanbanItem},
        partner::{PartnerPayload, RawPartner},
    },
};

/// Resposta de `create`: o id gerado pelo banco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    pub id: i64,
}

/// Resposta de `update`, `delete` e `upsert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    pub ok: bool,
}

impl WriteAck {
    pub const OK: WriteAck = WriteAck { ok: true };
    pub const MISSING: WriteAck = WriteAck { ok: false };

    /// Erro se a persistência não confirmou a escrita.
    pub fn require(self, operation: &str) -> Result<(), AppError> {
        if self.ok {
            Ok(())
        } else {
            Err(AppError::MalformedResponse(format!(
                "{operation} não foi confirmado"
            )))
        }
    }
}

impl CreatedRecord {
    pub fn require_id(self) -> Result<i64, AppError> {
        if self.id > 0 {
            Ok(self.id)
        } else {
            Err(AppError::MalformedResponse(format!(
                "id inválido retornado: {}",
                self.id
            )))
        }
    }
}

#[async_trait]
pub trait PersistenceBoundary: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<RawCompany>, AppError>;
    async fn create_company(&self, payload: CompanyPayload) -> Result<CreatedRecord, AppError>;
    async fn update_company(&self, payload: CompanyPayload) -> Result<WriteAck, AppError>;
    async fn delete_company(&self, id: i64) -> Result<WriteAck, AppError>;

    async fn list_partners(&self) -> Result<Vec<RawPartner>, AppError>;
    async fn create_partner(&self, payload: PartnerPayload) -> Result<CreatedRecord, AppError>;
    async fn update_partner(&self, payload: PartnerPayload) -> Result<WriteAck, AppError>;
    async fn delete_partner(&self, id: i64) -> Result<WriteAck, AppError>;

    async fn list_kanban(&self) -> Result<Vec<RawKanbanItem>, AppError>;
    /// Upsert pela chave natural (company, stage).
    async fn upsert_kanban(&self, payload: KanbanPayload) -> Result<WriteAck, AppError>;
}
