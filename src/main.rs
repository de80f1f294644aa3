//src/main.rs

use distribuidora::{
    config::{AppConfig, AppState},
    services::{
        selectors::{kanban_summary, select_companies, select_partners},
        state::Resource,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config).await?;

    app_state.store.fetch_all().await;
    let state = app_state.store.get_state();

    for resource in Resource::ALL {
        if let Some(message) = state.errors.get(resource) {
            tracing::warn!("{}: {}", resource.as_str(), message);
        }
    }

    tracing::info!(
        "✅ {} clientes, {} distribuidores carregados",
        select_companies(&state).len(),
        select_partners(&state).len()
    );
    for summary in kanban_summary(&state) {
        tracing::info!(
            "{}: {} itens, {}/{} recibos",
            summary.stage,
            summary.items,
            summary.receipts,
            summary.total
        );
    }

    // Snapshot completo para quem consome pela linha de comando
    println!("{}", serde_json::to_string_pretty(state.as_ref())?);
    Ok(())
}
