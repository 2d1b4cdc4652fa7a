use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the application router from validated config.
pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = AppState::from_config(cfg)?;
    info!(upstream = %state.upstream.base_url(), "upstream client ready");
    Ok(routes::build_router(state, build_cors()))
}

/// Resolve once `signal` fires. A signal that cannot be installed never resolves,
/// so the server keeps running rather than stopping immediately.
pub async fn shutdown_on<S>(signal: S)
where
    S: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!(event = "shutdown_signal", "shutdown signal received"),
        Err(e) => {
            error!(event = "signal_install_failed", error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and run the HTTP server until the process exits.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_until(cfg, std::future::pending()).await
}

/// Run the HTTP server, draining in-flight requests once `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg)?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "bookstore server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("bookstore server stopped");
    Ok(())
}
