// src/services/normalize.rs

use crate::models::{
    kanban::KanbanItem,
    normalized::{Entity, NormalizedEntities, NormalizedKanban},
};

/// Lista -> `{by_id, all_ids}` na ordem de entrada.
///
/// Ids repetidos não duplicam `all_ids`: a posição é a da primeira
/// ocorrência e o valor é o da última.
pub fn normalize_entities<T: Entity>(items: Vec<T>) -> NormalizedEntities<T> {
    let mut normalized = NormalizedEntities::default();
    for item in items {
        let id = item.id();
        if normalized.by_id.insert(id, item).is_some() {
            tracing::warn!("id duplicado na normalização: {}", id);
        } else {
            normalized.all_ids.push(id);
        }
    }
    normalized
}

pub fn create_empty_entities<T>() -> NormalizedEntities<T> {
    NormalizedEntities::default()
}

/// Volta para lista, na ordem de `all_ids`.
pub fn denormalize_entities<T: Clone>(entities: &NormalizedEntities<T>) -> Vec<T> {
    entities
        .all_ids
        .iter()
        .filter_map(|id| entities.by_id.get(id).cloned())
        .collect()
}

pub fn normalize_kanban(items: Vec<KanbanItem>) -> NormalizedKanban {
    let mut normalized = NormalizedKanban::default();
    for item in items {
        let key = item.key.clone();
        let stage = item.stage;
        if normalized.items.insert(key.clone(), item).is_some() {
            tracing::warn!("chave duplicada no kanban: {}", key);
            continue;
        }
        normalized.by_stage.entry(stage).or_default().push(key);
    }
    normalized
}

pub fn create_empty_kanban() -> NormalizedKanban {
    NormalizedKanban::default()
}
