//! Warden policy-server HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, the Casbin policy engine, and the HTTP router, then
//! starts the API and metrics listeners.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use anyhow::Context;
use std::future::Future;
use warden_server::app::{build_router, AppState};
use warden_server::config::ServerConfig;
use warden_server::observability;
use warden_server::rbac::engine::PolicyEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env_or_yaml().context("policy server config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("warden-server")?;
    let state = build_state(&config).await?;
    let metrics_task = tokio::spawn(run_metrics(metrics_handle, config.metrics_bind));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "policy server listening");
    tracing::info!("health check: http://{addr}/api/health");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    metrics_task.abort();
    let _ = metrics_task.await;
    tracing::info!("policy server stopped");
    Ok(())
}

// The API keeps serving when the metrics listener fails; the failure is logged.
async fn run_metrics(
    handle: metrics_exporter_prometheus::PrometheusHandle,
    addr: std::net::SocketAddr,
) -> std::io::Result<()> {
    let result = observability::serve_metrics(handle, addr).await;
    if let Err(err) = &result {
        tracing::warn!(%addr, error = %err, "metrics listener failed");
    }
    result
}

async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let engine = PolicyEngine::load(&config.policy_source, config.persist_policy)
        .await
        .context("initialize casbin enforcer")?;
    tracing::info!(persist = engine.persists(), "casbin enforcer initialized");
    Ok(AppState { engine })
}
