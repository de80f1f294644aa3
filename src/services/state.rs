// src/services/state.rs

use serde::Serialize;

use crate::models::{
    company::Company,
    normalized::{NormalizedEntities, NormalizedKanban},
    partner::Partner,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Companies,
    Partners,
    Kanban,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Companies, Resource::Partners, Resource::Kanban];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Companies => "companies",
            Resource::Partners => "partners",
            Resource::Kanban => "kanban",
        }
    }
}

// idle -> loading -> success | error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Um valor por recurso.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerResource<T> {
    pub companies: T,
    pub partners: T,
    pub kanban: T,
}

impl<T> PerResource<T> {
    pub fn get(&self, resource: Resource) -> &T {
        match resource {
            Resource::Companies => &self.companies,
            Resource::Partners => &self.partners,
            Resource::Kanban => &self.kanban,
        }
    }

    pub fn set(&mut self, resource: Resource, value: T) {
        match resource {
            Resource::Companies => self.companies = value,
            Resource::Partners => self.partners = value,
            Resource::Kanban => self.kanban = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub companies: NormalizedEntities<Company>,
    pub partners: NormalizedEntities<Partner>,
    pub kanban: NormalizedKanban,
    pub status: PerResource<LoadStatus>,
    pub errors: PerResource<Option<String>>,
}
