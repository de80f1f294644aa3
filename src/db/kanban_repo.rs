// src/db/kanban_repo.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    models::kanban::{RawKanbanItem, Stage},
};

#[derive(Clone)]
pub struct KanbanRepository {
    pool: SqlitePool,
}

impl KanbanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<RawKanbanItem>, AppError> {
        let items = sqlx::query_as::<_, RawKanbanItem>(
            "SELECT company, stage, receipts, total FROM kanban ORDER BY rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // UPSERT pela chave (company, stage)
    pub async fn upsert(
        &self,
        company: &str,
        stage: Stage,
        receipts: i64,
        total: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO kanban (company, stage, receipts, total)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (company, stage)
            DO UPDATE SET
                receipts = excluded.receipts,
                total = excluded.total
            "#,
        )
        .bind(company)
        .bind(stage)
        .bind(receipts)
        .bind(total)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
