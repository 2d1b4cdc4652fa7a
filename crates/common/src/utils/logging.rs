use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset, for both output formats.
///
/// Request, review and upstream events are info/warn. Lookup and duplicate-user
/// events are debug and need e.g. `RUST_LOG=info,server::routes=debug,service=debug`.
pub const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else, or unset, is compact.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stdout subscriber in the given format. Later calls are no-ops.
pub fn init_logging(format: LogFormat) {
    let builder = fmt().with_env_filter(env_filter()).with_target(false).with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Pick the format from `LOG_FORMAT`.
pub fn init_logging_from_env() {
    init_logging(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));
}
