use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env first so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "bookstore", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "bookstore",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // config.toml first, then environment variables
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "bookstore", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "bookstore", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "bookstore",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "bookstore service starting"
    );

    rt.block_on(async move {
        let shutdown = async move {
            server::shutdown_on(tokio::signal::ctrl_c()).await;
            info!(service = "bookstore", event = "shutdown", %service_id, pid, "received Ctrl+C, shutting down");
        };
        match server::run_until(cfg, shutdown).await {
            Ok(()) => {
                info!(service = "bookstore", event = "stop", %service_id, pid, "bookstore stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "bookstore", event = "run_failed", error = %e, "server::run_until returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
