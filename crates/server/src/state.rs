use std::{sync::Arc, time::Duration};

use common::UpstreamClient;
use configs::AppConfig;
use service::{Bookstore, Catalog};
use tokio::sync::RwLock;
use tracing::info;

/// Shared handler state. The bookstore sits behind one lock so each handler
/// applies its whole mutation before another request can observe it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Bookstore>>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(store: Bookstore, upstream: UpstreamClient) -> Self {
        Self { store: Arc::new(RwLock::new(store)), upstream }
    }

    /// Build state from validated config: seed catalog plus upstream client.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let catalog = match cfg.catalog.seed_path.as_deref() {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::seeded(),
        };
        info!(books = catalog.len(), "catalog ready");
        let upstream = UpstreamClient::new(
            &cfg.upstream.base_url,
            Duration::from_secs(cfg.upstream.timeout_secs),
        )?;
        Ok(Self::new(Bookstore::new(catalog), upstream))
    }
}
