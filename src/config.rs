// src/config.rs

use std::{env, sync::Arc, time::Duration};

use sqlx::SqlitePool;

use crate::{
    boundary::PersistenceBoundary,
    common::sanitize::DEFAULT_MAX_LENGTH,
    db::pool,
    handlers::SqlBoundary,
    services::DomainStore,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` = modo offline (sem banco, dados de demonstração).
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub text_max_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            text_max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // .env é opcional
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                anyhow::anyhow!("DB_MAX_CONNECTIONS inválido '{}': {}", raw, e)
            })?,
            None => defaults.max_connections,
        };
        let acquire_timeout = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("DB_ACQUIRE_TIMEOUT_SECS inválido '{}': {}", raw, e)
            })?),
            None => defaults.acquire_timeout,
        };
        let text_max_length = match lookup("TEXT_MAX_LENGTH") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("TEXT_MAX_LENGTH inválido '{}': {}", raw, e)
            })?,
            None => defaults.text_max_length,
        };

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout,
            text_max_length,
        })
    }
}

// O estado compartilhado da aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: Option<SqlitePool>,
    pub store: DomainStore,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL não definida: rodando em modo offline");
            return Ok(Self {
                db_pool: None,
                store: DomainStore::offline(),
            });
        };

        let db_pool =
            pool::connect(database_url, config.max_connections, config.acquire_timeout).await?;

        // --- Monta o gráfico de dependências ---
        let boundary: Arc<dyn PersistenceBoundary> = Arc::new(
            SqlBoundary::new(db_pool.clone()).with_max_text_length(config.text_max_length),
        );
        let store = DomainStore::new(Some(boundary));

        Ok(Self {
            db_pool: Some(db_pool),
            store,
        })
    }
}
