// src/services/selectors.rs

// Projeções puras sobre um snapshot da store. Aguentam store recém-criada.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    models::{
        company::Company,
        contact::RecordStatus,
        kanban::{KanbanItem, Stage},
        partner::{Partner, ReceiptsStatus},
    },
    services::{normalize::denormalize_entities, state::StoreState},
};

pub fn select_companies(state: &StoreState) -> Vec<Company> {
    denormalize_entities(&state.companies)
}

pub fn select_partners(state: &StoreState) -> Vec<Partner> {
    denormalize_entities(&state.partners)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanColumn {
    pub stage: Stage,
    pub items: Vec<KanbanItem>,
}

/// Sempre três colunas, na ordem do pipeline.
pub fn select_kanban_columns(state: &StoreState) -> Vec<KanbanColumn> {
    Stage::ALL
        .into_iter()
        .map(|stage| KanbanColumn {
            stage,
            items: state
                .kanban
                .keys(stage)
                .iter()
                .filter_map(|key| state.kanban.items.get(key).cloned())
                .collect(),
        })
        .collect()
}

// --- Listagem de clientes (busca, filtro, ordenação, paginação) ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanySort {
    #[default]
    Name,
    Stores,
    TotalValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyQuery {
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
    pub sort: CompanySort,
    pub direction: SortDirection,
    /// Começa em 1.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CompanyQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort: CompanySort::Name,
            direction: SortDirection::Asc,
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

pub fn query_companies(state: &StoreState, query: &CompanyQuery) -> Page<Company> {
    let needle = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut matches: Vec<Company> = select_companies(state)
        .into_iter()
        .filter(|company| query.status.is_none_or(|status| company.status == status))
        .filter(|company| match &needle {
            None => true,
            Some(needle) => [&company.name, &company.company_type, &company.contact.name]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
        })
        .collect();

    // Ordenação estável: empates mantêm a ordem de `all_ids`
    matches.sort_by(|a, b| {
        let ordering = match query.sort {
            CompanySort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CompanySort::Stores => a.stores.cmp(&b.stores),
            CompanySort::TotalValue => a
                .total_value
                .partial_cmp(&b.total_value)
                .unwrap_or(Ordering::Equal),
        };
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let page_size = query.page_size.max(1);
    let total_items = matches.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let items = matches
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        total_items,
        total_pages,
    }
}

pub fn filter_partners(
    state: &StoreState,
    region: Option<&str>,
    receipts_status: Option<ReceiptsStatus>,
) -> Vec<Partner> {
    select_partners(state)
        .into_iter()
        .filter(|partner| region.is_none_or(|region| partner.region.eq_ignore_ascii_case(region)))
        .filter(|partner| receipts_status.is_none_or(|status| partner.receipts_status == status))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub items: usize,
    pub receipts: i64,
    pub total: i64,
}

pub fn kanban_summary(state: &StoreState) -> Vec<StageSummary> {
    select_kanban_columns(state)
        .into_iter()
        .map(|column| StageSummary {
            stage: column.stage,
            items: column.items.len(),
            receipts: column.items.iter().map(|item| item.receipts).sum(),
            total: column.items.iter().map(|item| item.total).sum(),
        })
        .collect()
}
