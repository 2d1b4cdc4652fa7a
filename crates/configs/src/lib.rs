use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// External book API used by the proxy routes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { base_url: default_upstream_base_url(), timeout_secs: default_upstream_timeout() }
    }
}

/// Optional JSON file replacing the built-in seed catalog.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub seed_path: Option<String>,
}

fn default_upstream_base_url() -> String { "https://api.example.com".to_string() }
fn default_upstream_timeout() -> u64 { 5 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

/// Read the file at `path`; only a missing file falls back to environment variables.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map_err(|e| anyhow!("invalid config file {path}: {e}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::from_env()),
        Err(e) => Err(anyhow!("cannot read config file {path}: {e}")),
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` if present, otherwise built from environment variables.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = load_or_env(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(url) = std::env::var("UPSTREAM_BASE_URL") {
            cfg.upstream.base_url = url;
        }
        if let Some(t) = std::env::var("UPSTREAM_TIMEOUT_SECS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.upstream.timeout_secs = t;
        }
        if let Ok(path) = std::env::var("CATALOG_SEED_PATH") {
            cfg.catalog.seed_path = Some(path);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.upstream.validate()?;
        self.catalog.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl UpstreamConfig {
    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.trim().to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("upstream.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("upstream.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }
}

impl CatalogConfig {
    fn normalize(&mut self) {
        if matches!(self.seed_path.as_deref(), Some(p) if p.trim().is_empty()) {
            self.seed_path = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.upstream.base_url, "https://api.example.com");
        assert_eq!(cfg.upstream.timeout_secs, 5);
        assert!(cfg.catalog.seed_path.is_none());
    }

    #[test]
    fn full_document_parses() {
        let mut cfg = parse(
            r#"
            [server]
            host = ""
            port = 3000
            worker_threads = 0

            [upstream]
            base_url = "http://localhost:9000"
            timeout_secs = 2

            [catalog]
            seed_path = "   "
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.upstream.base_url, "http://localhost:9000");
        assert!(cfg.catalog.seed_path.is_none());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = parse("[server]\nhost = \"0.0.0.0\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn non_http_upstream_is_rejected() {
        let mut cfg = parse("[upstream]\nbase_url = \"ftp://books\"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[upstream]\ntimeout_secs = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn load_from_file_reads_toml() {
        let path = std::env::temp_dir().join(format!("bookstore_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 9090\n").unwrap();
        let cfg = load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_from_file("/nonexistent-bookstore-config.toml").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let cfg = AppConfig::load_and_validate_from("/nonexistent-bookstore-config.toml").unwrap();
        assert!(cfg.server.port > 0);
        assert!(cfg.server.worker_threads.is_some());
    }

    #[test]
    fn malformed_file_is_not_silently_replaced() {
        let path = std::env::temp_dir().join(format!("bookstore_bad_cfg_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let res = AppConfig::load_and_validate_from(path.to_str().unwrap());
        let _ = std::fs::remove_file(&path);
        let err = res.unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        // a directory exists but cannot be read as a file
        let dir = std::env::temp_dir();
        assert!(AppConfig::load_and_validate_from(dir.to_str().unwrap()).is_err());
    }
}
