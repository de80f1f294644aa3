// src/models/normalized.rs

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::company::Company;
use super::kanban::{KanbanItem, Stage};
use super::partner::Partner;

/// Qualquer registro com chave primária numérica.
pub trait Entity {
    fn id(&self) -> i64;
}

impl Entity for Company {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Entity for Partner {
    fn id(&self) -> i64 {
        self.id
    }
}

// Mapa por id + ordem de exibição.
// Invariante: `all_ids` sem repetição e exatamente as chaves de `by_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEntities<T> {
    pub by_id: HashMap<i64, T>,
    pub all_ids: Vec<i64>,
}

impl<T> Default for NormalizedEntities<T> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            all_ids: Vec::new(),
        }
    }
}

impl<T> NormalizedEntities<T> {
    pub fn get(&self, id: i64) -> Option<&T> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }

    pub fn max_id(&self) -> Option<i64> {
        self.all_ids.iter().copied().max()
    }
}

// Itens do kanban por chave + lista de chaves por etapa.
// Invariante: cada chave está em exatamente um balde, o da sua etapa.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedKanban {
    pub items: HashMap<String, KanbanItem>,
    pub by_stage: BTreeMap<Stage, Vec<String>>,
}

impl Default for NormalizedKanban {
    fn default() -> Self {
        // Os três baldes sempre existem, mesmo vazios
        let by_stage = Stage::ALL.into_iter().map(|stage| (stage, Vec::new())).collect();
        Self {
            items: HashMap::new(),
            by_stage,
        }
    }
}

impl NormalizedKanban {
    pub fn get(&self, key: &str) -> Option<&KanbanItem> {
        self.items.get(key)
    }

    pub fn keys(&self, stage: Stage) -> &[String] {
        self.by_stage.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }
}
