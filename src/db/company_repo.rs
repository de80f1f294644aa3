// src/db/company_repo.rs

use sqlx::SqlitePool;

use crate::{common::error::AppError, models::company::RawCompany};

/// Linha já saneada, pronta para o INSERT/UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRow {
    pub name: String,
    pub company_type: Option<String>,
    pub stores: i64,
    pub stores_by_state_json: Option<String>,
    pub total_value: f64,
    pub status: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
}

// O repositório de clientes, responsável pela tabela 'companies'
#[derive(Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<RawCompany>, AppError> {
        let companies = sqlx::query_as::<_, RawCompany>(
            r#"
            SELECT id, name, type, stores, stores_by_state_json, total_value,
                   status, contact_name, contact_phone, contact_email
            FROM companies
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    pub async fn insert(&self, row: &CompanyRow) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO companies (
                name, type, stores, stores_by_state_json, total_value,
                status, contact_name, contact_phone, contact_email
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&row.name)
        .bind(&row.company_type)
        .bind(row.stores)
        .bind(&row.stores_by_state_json)
        .bind(row.total_value)
        .bind(&row.status)
        .bind(&row.contact_name)
        .bind(&row.contact_phone)
        .bind(&row.contact_email)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &row.name))?;

        Ok(result.last_insert_rowid())
    }

    /// Retorna `false` se o id não existe.
    pub async fn update(&self, id: i64, row: &CompanyRow) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE companies SET
                name = ?1, type = ?2, stores = ?3, stores_by_state_json = ?4,
                total_value = ?5, status = ?6,
                contact_name = ?7, contact_phone = ?8, contact_email = ?9
            WHERE id = ?10
            "#,
        )
        .bind(&row.name)
        .bind(&row.company_type)
        .bind(row.stores)
        .bind(&row.stores_by_state_json)
        .bind(row.total_value)
        .bind(&row.status)
        .bind(&row.contact_name)
        .bind(&row.contact_phone)
        .bind(&row.contact_email)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, &row.name))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
