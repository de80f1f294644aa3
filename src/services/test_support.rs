// src/services/test_support.rs

// Dublê da persistência para os testes da store: guarda tudo em memória,
// conta as chamadas e pode ser instruído a falhar.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    boundary::{CreatedRecord, PersistenceBoundary, WriteAck},
    common::error::AppError,
    models::{
        company::{CompanyPayload, RawCompany},
        kanban::{KanbanPayload, RawKanbanItem, Stage},
        partner::{PartnerPayload, RawPartner},
    },
};

#[derive(Default)]
pub struct RecordingBoundary {
    pub companies: Mutex<Vec<RawCompany>>,
    pub partners: Mutex<Vec<RawPartner>>,
    pub kanban: Mutex<Vec<RawKanbanItem>>,
    pub calls: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub reject_writes: AtomicBool,
    /// Se preenchido, `create_*` devolve este id em vez do próximo.
    pub forced_id: Mutex<Option<i64>>,
}

impl RecordingBoundary {
    pub fn with_companies(companies: Vec<RawCompany>) -> Self {
        Self {
            companies: Mutex::new(companies),
            ..Default::default()
        }
    }

    pub fn with_kanban(items: Vec<RawKanbanItem>) -> Self {
        Self {
            kanban: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn read(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("banco indisponível")));
        }
        Ok(())
    }

    fn write(&self) -> Result<WriteAck, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("falha na escrita")));
        }
        if self.reject_writes.load(Ordering::SeqCst) {
            return Ok(WriteAck::MISSING);
        }
        Ok(WriteAck::OK)
    }

    fn next_id(&self, current_max: Option<i64>) -> i64 {
        self.forced_id
            .lock()
            .unwrap()
            .unwrap_or_else(|| current_max.unwrap_or(100) + 1)
    }
}

pub fn raw_company(id: i64, name: &str) -> RawCompany {
    RawCompany {
        id,
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn raw_kanban(company: &str, stage: Stage, receipts: i64, total: i64) -> RawKanbanItem {
    RawKanbanItem {
        company: company.to_string(),
        stage,
        receipts,
        total,
    }
}

fn company_from_payload(id: i64, payload: CompanyPayload) -> RawCompany {
    RawCompany {
        id,
        name: payload.name,
        company_type: payload.company_type,
        stores: payload.stores.map(|v| v as i64),
        stores_by_state_json: payload.stores_by_state_json,
        total_value: payload.total_value,
        status: payload.status,
        contact_name: payload.contact_name,
        contact_phone: payload.contact_phone,
        contact_email: payload.contact_email,
    }
}

fn partner_from_payload(id: i64, payload: PartnerPayload) -> RawPartner {
    RawPartner {
        id,
        name: payload.name,
        region: payload.region,
        cities_json: payload.cities_json,
        contact_name: payload.contact_name,
        contact_phone: payload.contact_phone,
        contact_email: payload.contact_email,
        status: payload.status,
        receipts_status: payload.receipts_status,
    }
}

#[async_trait]
impl PersistenceBoundary for RecordingBoundary {
    async fn list_companies(&self) -> Result<Vec<RawCompany>, AppError> {
        self.read()?;
        Ok(self.companies.lock().unwrap().clone())
    }

    async fn create_company(&self, payload: CompanyPayload) -> Result<CreatedRecord, AppError> {
        self.write()?;
        let mut companies = self.companies.lock().unwrap();
        let id = self.next_id(companies.iter().map(|c| c.id).max());
        companies.push(company_from_payload(id, payload));
        Ok(CreatedRecord { id })
    }

    async fn update_company(&self, payload: CompanyPayload) -> Result<WriteAck, AppError> {
        let ack = self.write()?;
        if ack.ok {
            let mut companies = self.companies.lock().unwrap();
            if let Some(row) = companies.iter_mut().find(|c| Some(c.id) == payload.id) {
                *row = company_from_payload(row.id, payload);
            }
        }
        Ok(ack)
    }

    async fn delete_company(&self, id: i64) -> Result<WriteAck, AppError> {
        let ack = self.write()?;
        if ack.ok {
            self.companies.lock().unwrap().retain(|c| c.id != id);
        }
        Ok(ack)
    }

    async fn list_partners(&self) -> Result<Vec<RawPartner>, AppError> {
        self.read()?;
        Ok(self.partners.lock().unwrap().clone())
    }

    async fn create_partner(&self, payload: PartnerPayload) -> Result<CreatedRecord, AppError> {
        self.write()?;
        let mut partners = self.partners.lock().unwrap();
        let id = self.next_id(partners.iter().map(|p| p.id).max());
        partners.push(partner_from_payload(id, payload));
        Ok(CreatedRecord { id })
    }

    async fn update_partner(&self, payload: PartnerPayload) -> Result<WriteAck, AppError> {
        let ack = self.write()?;
        if ack.ok {
            let mut partners = self.partners.lock().unwrap();
            if let Some(row) = partners.iter_mut().find(|p| Some(p.id) == payload.id) {
                *row = partner_from_payload(row.id, payload);
            }
        }
        Ok(ack)
    }

    async fn delete_partner(&self, id: i64) -> Result<WriteAck, AppError> {
        let ack = self.write()?;
        if ack.ok {
            self.partners.lock().unwrap().retain(|p| p.id != id);
        }
        Ok(ack)
    }

    async fn list_kanban(&self) -> Result<Vec<RawKanbanItem>, AppError> {
        self.read()?;
        Ok(self.kanban.lock().unwrap().clone())
    }

    async fn upsert_kanban(&self, payload: KanbanPayload) -> Result<WriteAck, AppError> {
        let ack = self.write()?;
        if ack.ok {
            let stage = Stage::parse(&payload.stage)
                .ok_or_else(|| AppError::invalid("stage", "etapa inválida"))?;
            let mut items = self.kanban.lock().unwrap();
            let row = raw_kanban(
                &payload.company,
                stage,
                payload.receipts as i64,
                payload.total as i64,
            );
            match items
                .iter_mut()
                .find(|i| i.company == payload.company && i.stage == stage)
            {
                Some(existing) => *existing = row,
                None => items.push(row),
            }
        }
        Ok(ack)
    }
}
