// src/handlers/kanban.rs

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        sanitize::{QuoteMode, sanitize_enum, sanitize_non_negative_int, sanitize_required},
    },
    models::kanban::{KanbanPayload, Stage},
};

#[derive(Debug, Clone, PartialEq)]
pub struct KanbanRow {
    pub company: String,
    pub stage: Stage,
    pub receipts: i64,
    pub total: i64,
}

pub fn sanitize_kanban(payload: &KanbanPayload, max_len: usize) -> Result<KanbanRow, AppError> {
    payload.validate()?;

    let stage = sanitize_enum("stage", &payload.stage, &Stage::VALUES)?;
    let stage = Stage::parse(stage).ok_or_else(|| AppError::invalid("stage", "etapa inválida"))?;

    Ok(KanbanRow {
        company: sanitize_required("company", &payload.company, QuoteMode::Normalize, max_len)?,
        stage,
        receipts: sanitize_non_negative_int("receipts", payload.receipts)?,
        total: sanitize_non_negative_int("total", payload.total)?,
    })
}
