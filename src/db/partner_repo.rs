// src/db/partner_repo.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, models::partner::RawPartner};

#[derive(Debug, Clone, PartialEq)]
pub struct PartnerRow {
    pub name: String,
    pub region: Option<String>,
    pub cities_json: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub status: String,
    pub receipts_status: String,
}

#[derive(Clone)]
pub struct PartnerRepository {
    pool: SqlitePool,
}

impl PartnerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<RawPartner>, AppError> {
        let partners = sqlx::query_as::<_, RawPartner>(
            r#"
            SELECT id, name, region, cities_json, contact_name, contact_phone,
                   contact_email, status, receipts_status
            FROM partners
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(partners)
    }

    pub async fn insert(&self, row: &PartnerRow) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO partners (
                name, region, cities_json, contact_name, contact_phone,
                contact_email, status, receipts_status
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&row.name)
        .bind(&row.region)
        .bind(&row.cities_json)
        .bind(&row.contact_name)
        .bind(&row.contact_phone)
        .bind(&row.contact_email)
        .bind(&row.status)
        .bind(&row.receipts_status)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &row.name))?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(&self, id: i64, row: &PartnerRow) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE partners SET
                name = ?1, region = ?2, cities_json = ?3,
                contact_name = ?4, contact_phone = ?5, contact_email = ?6,
                status = ?7, receipts_status = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&row.name)
        .bind(&row.region)
        .bind(&row.cities_json)
        .bind(&row.contact_name)
        .bind(&row.contact_phone)
        .bind(&row.contact_email)
        .bind(&row.status)
        .bind(&row.receipts_status)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &row.name))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM partners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
