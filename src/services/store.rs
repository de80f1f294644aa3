// src/services/store.rs

use std::{
    future::Future,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::{
    boundary::PersistenceBoundary,
    common::error::AppError,
    models::{
        company::{Company, CompanyInput, CompanyUpdate},
        kanban::{KanbanItem, KanbanPayload, Stage},
        partner::{Partner, PartnerInput, PartnerUpdate},
    },
    services::{
        adapters::{adapt_company, adapt_kanban_item, adapt_partner},
        fallback,
        fetcher::{FallbackReason, FetchOptions, fetch_with_fallback},
        normalize::{normalize_entities, normalize_kanban},
        state::{LoadStatus, Resource, StoreState},
    },
};

type Listener = Arc<dyn Fn(&StoreState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    state: RwLock<Arc<StoreState>>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
    boundary: Option<Arc<dyn PersistenceBoundary>>,
}

/// Estado do app (clientes, distribuidores, kanban) espelhando o banco.
///
/// Clonar a store é barato: todos os clones compartilham o mesmo estado.
/// Sem persistência (`boundary = None`) as leituras usam os dados locais de
/// demonstração e as criações geram ids localmente.
#[derive(Clone)]
pub struct DomainStore {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DomainStore {
    pub fn new(boundary: Option<Arc<dyn PersistenceBoundary>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(StoreState::default())),
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
                boundary,
            }),
        }
    }

    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_offline(&self) -> bool {
        self.inner.boundary.is_none()
    }

    // ---
    // Estado e assinantes
    // ---

    /// Snapshot atual. Se nada mudou, é o mesmo `Arc` da chamada anterior.
    pub fn get_state(&self) -> Arc<StoreState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Aplica `update` e notifica os assinantes, fora de qualquer lock.
    pub fn set_state(&self, update: impl FnOnce(&mut StoreState)) {
        let snapshot = {
            let mut guard = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            update(Arc::make_mut(&mut *guard));
            guard.clone()
        };

        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(snapshot.as_ref());
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&StoreState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        lock(&self.inner.listeners).push((id, Arc::new(listener)));
        id
    }

    /// Só chama `listener` quando o valor selecionado muda (`PartialEq`).
    pub fn subscribe_with_selector<T, S, F>(&self, selector: S, listener: F) -> SubscriptionId
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&StoreState) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let previous = Mutex::new(selector(self.get_state().as_ref()));
        self.subscribe(move |state| {
            let next = selector(state);
            let changed = {
                let mut previous = lock(&previous);
                if *previous == next {
                    false
                } else {
                    *previous = next.clone();
                    true
                }
            };
            if changed {
                listener(&next);
            }
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = lock(&self.inner.listeners);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    // ---
    // Leituras
    // ---

    pub async fn fetch_all(&self) {
        tokio::join!(self.fetch_companies(), self.fetch_partners(), self.fetch_kanban());
    }

    pub async fn fetch_companies(&self) -> LoadStatus {
        let result = self
            .load(Resource::Companies, fallback::companies(), |boundary| async move {
                boundary.list_companies().await
            })
            .await;
        self.finish_load(Resource::Companies, result, |state, rows| {
            state.companies = normalize_entities(rows.into_iter().map(adapt_company).collect());
        })
    }

    pub async fn fetch_partners(&self) -> LoadStatus {
        let result = self
            .load(Resource::Partners, fallback::partners(), |boundary| async move {
                boundary.list_partners().await
            })
            .await;
        self.finish_load(Resource::Partners, result, |state, rows| {
            state.partners = normalize_entities(rows.into_iter().map(adapt_partner).collect());
        })
    }

    pub async fn fetch_kanban(&self) -> LoadStatus {
        let result = self
            .load(Resource::Kanban, fallback::kanban(), |boundary| async move {
                boundary.list_kanban().await
            })
            .await;
        self.finish_load(Resource::Kanban, result, |state, rows| {
            state.kanban = normalize_kanban(rows.into_iter().map(adapt_kanban_item).collect());
        })
    }

    // Falha da persistência vira `Err(mensagem)`; ausência ou resposta vazia
    // entregam os dados locais.
    async fn load<R, L, Fut>(
        &self,
        resource: Resource,
        fallback_rows: Vec<R>,
        loader: L,
    ) -> Result<Vec<R>, String>
    where
        L: FnOnce(Arc<dyn PersistenceBoundary>) -> Fut,
        Fut: Future<Output = Result<Vec<R>, AppError>>,
    {
        self.set_state(|state| {
            state.status.set(resource, LoadStatus::Loading);
            state.errors.set(resource, None);
        });

        let mut failure = None;
        let options = FetchOptions::new(self.inner.boundary.clone(), resource.as_str())
            .on_fallback(|reason| {
                if let FallbackReason::Failed(e) = reason {
                    failure = Some(e.to_string());
                }
            });
        let rows = fetch_with_fallback(
            fallback_rows,
            |boundary| async move { loader(boundary).await.map(Some) },
            options,
        )
        .await;

        match failure {
            Some(message) => Err(message),
            None => Ok(rows),
        }
    }

    fn finish_load<R>(
        &self,
        resource: Resource,
        result: Result<Vec<R>, String>,
        apply: impl FnOnce(&mut StoreState, Vec<R>),
    ) -> LoadStatus {
        match result {
            Ok(rows) => {
                let count = rows.len();
                self.set_state(|state| {
                    apply(state, rows);
                    state.status.set(resource, LoadStatus::Success);
                });
                tracing::info!("{} carregados: {}", resource.as_str(), count);
                LoadStatus::Success
            }
            Err(message) => {
                tracing::error!("{}: mantendo dados anteriores ({})", resource.as_str(), message);
                self.set_state(|state| {
                    state.status.set(resource, LoadStatus::Error);
                    state.errors.set(resource, Some(message));
                });
                LoadStatus::Error
            }
        }
    }

    // ---
    // Escritas: ou persistência + estado local, ou nada.
    // ---

    /// Cria o cliente e devolve o registro que ficou na store.
    ///
    /// A persistência só devolve o id: o registro local é montado a partir de
    /// `input`, sem o saneamento aplicado no banco, até o próximo `fetch`.
    /// Se o id já existir na store, o registro atual é mantido e devolvido.
    pub async fn create_company(&self, input: CompanyInput) -> Result<Company, AppError> {
        let fallback_id = self.get_state().companies.max_id().map_or(1, |max| max + 1);

        let id = match &self.inner.boundary {
            Some(boundary) => {
                let payload = Company::from_input(fallback_id, input.clone()).to_payload(false);
                boundary.create_company(payload).await?.require_id()?
            }
            None => fallback_id,
        };

        if let Some(existing) = self.get_state().companies.get(id).cloned() {
            tracing::warn!("cliente {} já existe na store, mantendo o registro atual", id);
            return Ok(existing);
        }

        let company = Company::from_input(id, input);
        self.set_state(|state| {
            if !state.companies.contains(id) {
                state.companies.by_id.insert(id, company.clone());
                state.companies.all_ids.push(id);
            }
        });
        tracing::debug!("cliente criado: {} ({})", company.name, id);
        Ok(company)
    }

    pub async fn update_company(&self, id: i64, update: CompanyUpdate) -> Result<Company, AppError> {
        let existing = self
            .get_state()
            .companies
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("company"))?;
        let next = existing.merged(update);

        if let Some(boundary) = &self.inner.boundary {
            boundary
                .update_company(next.to_payload(true))
                .await?
                .require("update_company")?;
        }

        self.set_state(|state| {
            if let Some(slot) = state.companies.by_id.get_mut(&id) {
                *slot = next.clone();
            }
        });
        tracing::debug!("cliente atualizado: {}", id);
        Ok(next)
    }

    pub async fn delete_company(&self, id: i64) -> Result<(), AppError> {
        if !self.get_state().companies.contains(id) {
            return Err(AppError::not_found("company"));
        }

        if let Some(boundary) = &self.inner.boundary {
            boundary.delete_company(id).await?.require("delete_company")?;
        }

        self.set_state(|state| {
            state.companies.by_id.remove(&id);
            state.companies.all_ids.retain(|existing| *existing != id);
        });
        tracing::debug!("cliente removido: {}", id);
        Ok(())
    }

    /// Mesmas regras de [`DomainStore::create_company`].
    pub async fn create_partner(&self, input: PartnerInput) -> Result<Partner, AppError> {
        let fallback_id = self.get_state().partners.max_id().map_or(1, |max| max + 1);

        let id = match &self.inner.boundary {
            Some(boundary) => {
                let payload = Partner::from_input(fallback_id, input.clone()).to_payload(false);
                boundary.create_partner(payload).await?.require_id()?
            }
            None => fallback_id,
        };

        if let Some(existing) = self.get_state().partners.get(id).cloned() {
            tracing::warn!("distribuidor {} já existe na store, mantendo o registro atual", id);
            return Ok(existing);
        }

        let partner = Partner::from_input(id, input);
        self.set_state(|state| {
            if !state.partners.contains(id) {
                state.partners.by_id.insert(id, partner.clone());
                state.partners.all_ids.push(id);
            }
        });
        tracing::debug!("distribuidor criado: {} ({})", partner.name, id);
        Ok(partner)
    }

    pub async fn update_partner(&self, id: i64, update: PartnerUpdate) -> Result<Partner, AppError> {
        let existing = self
            .get_state()
            .partners
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("partner"))?;
        let next = existing.merged(update);

        if let Some(boundary) = &self.inner.boundary {
            boundary
                .update_partner(next.to_payload(true))
                .await?
                .require("update_partner")?;
        }

        self.set_state(|state| {
            if let Some(slot) = state.partners.by_id.get_mut(&id) {
                *slot = next.clone();
            }
        });
        tracing::debug!("distribuidor atualizado: {}", id);
        Ok(next)
    }

    pub async fn delete_partner(&self, id: i64) -> Result<(), AppError> {
        if !self.get_state().partners.contains(id) {
            return Err(AppError::not_found("partner"));
        }

        if let Some(boundary) = &self.inner.boundary {
            boundary.delete_partner(id).await?.require("delete_partner")?;
        }

        self.set_state(|state| {
            state.partners.by_id.remove(&id);
            state.partners.all_ids.retain(|existing| *existing != id);
        });
        tracing::debug!("distribuidor removido: {}", id);
        Ok(())
    }

    /// Move o item para outra etapa. Recibos e total seguem iguais; o item
    /// vai para o fim da coluna de destino com a chave nova.
    pub async fn move_kanban_item(&self, key: &str, next_stage: Stage) -> Result<KanbanItem, AppError> {
        let existing = self
            .get_state()
            .kanban
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found("pipeline item"))?;

        if existing.stage == next_stage {
            return Ok(existing);
        }

        if let Some(boundary) = &self.inner.boundary {
            let payload =
                KanbanPayload::new(&existing.company, next_stage, existing.receipts, existing.total);
            boundary.upsert_kanban(payload).await?.require("upsert_kanban")?;
        }

        let moved = KanbanItem {
            key: KanbanItem::key_for(&existing.company, next_stage),
            stage: next_stage,
            ..existing.clone()
        };

        self.set_state(|state| {
            let kanban = &mut state.kanban;
            kanban.items.remove(key);
            if let Some(bucket) = kanban.by_stage.get_mut(&existing.stage) {
                bucket.retain(|k| k != key);
            }

            let bucket = kanban.by_stage.entry(next_stage).or_default();
            bucket.retain(|k| *k != moved.key);
            bucket.push(moved.key.clone());
            kanban.items.insert(moved.key.clone(), moved.clone());
        });
        tracing::debug!("kanban: {} -> {}", key, moved.key);
        Ok(moved)
    }

    /// Edição de recibos/total de um item. Exige `receipts <= total`.
    pub async fn update_kanban_totals(
        &self,
        key: &str,
        receipts: i64,
        total: i64,
    ) -> Result<KanbanItem, AppError> {
        let existing = self
            .get_state()
            .kanban
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found("pipeline item"))?;

        if receipts < 0 {
            return Err(AppError::invalid("receipts", "não pode ser negativo"));
        }
        if total < 0 {
            return Err(AppError::invalid("total", "não pode ser negativo"));
        }
        if receipts > total {
            return Err(AppError::invalid("receipts", "recibos não podem exceder o total"));
        }

        if let Some(boundary) = &self.inner.boundary {
            let payload = KanbanPayload::new(&existing.company, existing.stage, receipts, total);
            boundary.upsert_kanban(payload).await?.require("upsert_kanban")?;
        }

        let updated = KanbanItem {
            receipts,
            total,
            ..existing
        };
        self.set_state(|state| {
            if let Some(slot) = state.kanban.items.get_mut(key) {
                *slot = updated.clone();
            }
        });
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
