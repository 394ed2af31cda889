/**
 * ENERGY KERNEL - Point d'entrée du serveur de relevés énergétiques
 *
 * RÔLE : Bootstrap : .env, logs, config, router Axum.
 * Arrêt propre sur Ctrl+C.
 */

use anyhow::Context;
use energy_kernel::config::load_config;
use energy_kernel::http::{build_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,energy_kernel=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let cfg = load_config().await.context("chargement de la configuration")?;
    let addr = cfg.listen_addr()?;
    info!(root = %cfg.root.display(), types = cfg.types.len(), "configuration chargée");
    if !cfg.root.is_dir() {
        warn!(root = %cfg.root.display(), "racine des stats introuvable, les requêtes répondront 500");
    }

    let app = build_router(AppState::new(Arc::new(cfg)));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("🚀 Serveur lancé sur http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serveur HTTP")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "écoute du signal d'arrêt impossible");
        std::future::pending::<()>().await;
    }
    info!("arrêt demandé");
}
