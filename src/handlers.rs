// src/handlers.rs

// Pontos de entrada da persistência: saneiam o payload e delegam ao repositório.

pub mod companies;
pub mod kanban;
pub mod partners;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    boundary::{CreatedRecord, PersistenceBoundary, WriteAck},
    common::{error::AppError, sanitize::DEFAULT_MAX_LENGTH},
    db::{CompanyRepository, KanbanRepository, PartnerRepository},
    models::{
        company::{CompanyPayload, RawCompany},
        kanban::{KanbanPayload, RawKanbanItem},
        partner::{PartnerPayload, RawPartner},
    },
};

#[derive(Clone)]
pub struct SqlBoundary {
    companies: CompanyRepository,
    partners: PartnerRepository,
    kanban: KanbanRepository,
    max_text_length: usize,
}

impl SqlBoundary {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            companies: CompanyRepository::new(pool.clone()),
            partners: PartnerRepository::new(pool.clone()),
            kanban: KanbanRepository::new(pool),
            max_text_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }
}

fn require_id(id: Option<i64>) -> Result<i64, AppError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid("id", "id obrigatório para atualização")),
    }
}

fn ack(found: bool) -> WriteAck {
    if found { WriteAck::OK } else { WriteAck::MISSING }
}

#[async_trait]
impl PersistenceBoundary for SqlBoundary {
    async fn list_companies(&self) -> Result<Vec<RawCompany>, AppError> {
        self.companies.list().await
    }

    async fn create_company(&self, payload: CompanyPayload) -> Result<CreatedRecord, AppError> {
        let row = companies::sanitize_company(&payload, self.max_text_length)?;
        let id = self.companies.insert(&row).await?;
        Ok(CreatedRecord { id })
    }

    async fn update_company(&self, payload: CompanyPayload) -> Result<WriteAck, AppError> {
        let id = require_id(payload.id)?;
        let row = companies::sanitize_company(&payload, self.max_text_length)?;
        Ok(ack(self.companies.update(id, &row).await?))
    }

    async fn delete_company(&self, id: i64) -> Result<WriteAck, AppError> {
        Ok(ack(self.companies.delete(id).await?))
    }

    async fn list_partners(&self) -> Result<Vec<RawPartner>, AppError> {
        self.partners.list().await
    }

    async fn create_partner(&self, payload: PartnerPayload) -> Result<CreatedRecord, AppError> {
        let row = partners::sanitize_partner(&payload, self.max_text_length)?;
        let id = self.partners.insert(&row).await?;
        Ok(CreatedRecord { id })
    }

    async fn update_partner(&self, payload: PartnerPayload) -> Result<WriteAck, AppError> {
        let id = require_id(payload.id)?;
        let row = partners::sanitize_partner(&payload, self.max_text_length)?;
        Ok(ack(self.partners.update(id, &row).await?))
    }

    async fn delete_partner(&self, id: i64) -> Result<WriteAck, AppError> {
        Ok(ack(self.partners.delete(id).await?))
    }

    async fn list_kanban(&self) -> Result<Vec<RawKanbanItem>, AppError> {
        self.kanban.list().await
    }

    async fn upsert_kanban(&self, payload: KanbanPayload) -> Result<WriteAck, AppError> {
        let row = kanban::sanitize_kanban(&payload, self.max_text_length)?;
        self.kanban
            .upsert(&row.company, row.stage, row.receipts, row.total)
            .await?;
        Ok(WriteAck::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::setup_test_db;
    use crate::models::kanban::Stage;

    #[tokio::test]
    async fn company_crud_against_sqlite() {
        let boundary = SqlBoundary::new(setup_test_db().await);

        let created = boundary
            .create_company(CompanyPayload {
                name: "  Água   Viva ".into(),
                stores: Some(4.0),
                stores_by_state_json: Some(r#"{"PE": 3, "PB": 1}"#.into()),
                total_value: Some(1500.5),
                contact_email: Some("VENDAS@AGUAVIVA.COM".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);

        let rows = boundary.list_companies().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Água Viva");
        assert_eq!(rows[0].stores, Some(4));
        assert_eq!(rows[0].total_value, Some(1500.5));
        assert_eq!(rows[0].contact_email.as_deref(), Some("vendas@aguaviva.com"));

        let ack = boundary
            .update_company(CompanyPayload {
                id: Some(1),
                name: "Água Viva Ltda".into(),
                status: Some("inativo".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(ack.ok);
        let rows = boundary.list_companies().await.unwrap();
        assert_eq!(rows[0].status.as_deref(), Some("inativo"));

        assert!(boundary.delete_company(1).await.unwrap().ok);
        assert!(!boundary.delete_company(1).await.unwrap().ok);
        assert!(boundary.list_companies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_company_name_is_rejected() {
        let boundary = SqlBoundary::new(setup_test_db().await);
        let payload = CompanyPayload {
            name: "Acme".into(),
            ..Default::default()
        };
        boundary.create_company(payload.clone()).await.unwrap();

        let err = boundary.create_company(payload).await.unwrap_err();
        assert!(matches!(err, AppError::UniqueConstraintViolation(_)));
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_storage() {
        let boundary = SqlBoundary::new(setup_test_db().await);
        let err = boundary
            .create_partner(PartnerPayload {
                name: "Norte".into(),
                contact_email: Some("não-é-email".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidField { field: "email", .. }));
        assert!(boundary.list_partners().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_acknowledged() {
        let boundary = SqlBoundary::new(setup_test_db().await);
        let ack = boundary
            .update_partner(PartnerPayload {
                id: Some(42),
                name: "Fantasma".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!ack.ok);

        let err = boundary
            .update_partner(PartnerPayload {
                name: "Sem id".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidField { field: "id", .. }));
    }

    #[tokio::test]
    async fn kanban_upsert_is_keyed_by_company_and_stage() {
        let boundary = SqlBoundary::new(setup_test_db().await);
        boundary
            .upsert_kanban(KanbanPayload::new("Acme", Stage::Recebimento, 1, 10))
            .await
            .unwrap();
        boundary
            .upsert_kanban(KanbanPayload::new("Acme", Stage::Recebimento, 5, 10))
            .await
            .unwrap();
        boundary
            .upsert_kanban(KanbanPayload::new("Acme", Stage::Relatorio, 0, 3))
            .await
            .unwrap();

        let rows = boundary.list_kanban().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stage, Stage::Recebimento);
        assert_eq!(rows[0].receipts, 5);
        assert_eq!(rows[1].stage, Stage::Relatorio);
    }

    #[tokio::test]
    async fn partner_cities_round_trip_as_json() {
        let boundary = SqlBoundary::new(setup_test_db().await);
        boundary
            .create_partner(PartnerPayload {
                name: "Sul".into(),
                cities_json: Some(r#"["Caruaru", "Garanhuns"]"#.into()),
                receipts_status: Some("enviado".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let rows = boundary.list_partners().await.unwrap();
        assert_eq!(rows[0].cities_json.as_deref(), Some(r#"["Caruaru","Garanhuns"]"#));
        assert_eq!(rows[0].receipts_status.as_deref(), Some("enviado"));
    }
}
