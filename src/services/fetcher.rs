// src/services/fetcher.rs

use std::{future::Future, sync::Arc};

use crate::{boundary::PersistenceBoundary, common::error::AppError};

/// Por que o fallback foi usado (a ausência da persistência não conta).
#[derive(Debug)]
pub enum FallbackReason<'a> {
    /// A persistência respondeu sem dados (`None`).
    Empty,
    /// A chamada falhou.
    Failed(&'a AppError),
}

pub struct FetchOptions<H> {
    pub boundary: Option<Arc<dyn PersistenceBoundary>>,
    pub on_fallback: Option<H>,
    /// Nome do recurso, só para os logs.
    pub label: &'static str,
}

impl FetchOptions<fn(FallbackReason<'_>)> {
    pub fn new(boundary: Option<Arc<dyn PersistenceBoundary>>, label: &'static str) -> Self {
        Self {
            boundary,
            on_fallback: None,
            label,
        }
    }
}

impl<H> FetchOptions<H> {
    pub fn on_fallback<G>(self, hook: G) -> FetchOptions<G>
    where
        G: FnOnce(FallbackReason<'_>),
    {
        FetchOptions {
            boundary: self.boundary,
            on_fallback: Some(hook),
            label: self.label,
        }
    }
}

/// Chama o `loader` e devolve `fallback` se não houver persistência, se ela
/// responder `None` ou se falhar. Nunca retorna erro.
///
/// Lista vazia é resposta válida e não aciona o fallback.
pub async fn fetch_with_fallback<T, L, Fut, H>(fallback: T, loader: L, options: FetchOptions<H>) -> T
where
    L: FnOnce(Arc<dyn PersistenceBoundary>) -> Fut,
    Fut: Future<Output = Result<Option<T>, AppError>>,
    H: FnOnce(FallbackReason<'_>),
{
    let FetchOptions {
        boundary,
        on_fallback,
        label,
    } = options;

    let Some(boundary) = boundary else {
        tracing::debug!("{}: sem persistência configurada, usando dados locais", label);
        return fallback;
    };

    match loader(boundary).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            tracing::warn!("{}: persistência não retornou dados, usando fallback", label);
            if let Some(hook) = on_fallback {
                hook(FallbackReason::Empty);
            }
            fallback
        }
        Err(e) => {
            tracing::warn!("{}: falha ao carregar ({}), usando fallback", label, e);
            if let Some(hook) = on_fallback {
                hook(FallbackReason::Failed(&e));
            }
            fallback
        }
    }
}
