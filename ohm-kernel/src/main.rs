/**
 * OHM KERNEL - Point d'entrée du serveur de calculs électriques
 *
 * RÔLE : Bootstrap : .env, config YAML, logs tracing, router HTTP, arrêt propre.
 *
 * ARCHITECTURE : API REST sans état, une route POST par formule (loi d'Ohm,
 * puissance, énergie, résistivité). Aucune donnée partagée entre requêtes.
 */

mod config;
mod error;
mod formulas;
mod health;
mod http;
mod logging;
mod models;
mod state;

use crate::config::{load_config, KernelConfig};
use crate::state::AppState;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok();

    // le niveau de log vient de la config : on la lit d'abord, on logge le repli ensuite
    let (cfg, notice): (KernelConfig, _) = load_config().await;
    logging::init_logging(&cfg.logging.level);
    if let Some(notice) = notice {
        notice.log();
    }

    let app = http::build_router(AppState::default());

    let addr = cfg.server.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!("[kernel] API Leis de Ohm listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serveur HTTP")?;

    tracing::info!("[kernel] arrêt");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("[kernel] handler Ctrl+C indisponible: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("[kernel] handler SIGTERM indisponible: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("[kernel] signal d'arrêt reçu");
}
