//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use qrcodes_core::{QrCodeService, SqlStore};

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Record operations over the SQLite store.
    pub records: Arc<QrCodeService<SqlStore>>,
}

impl AppState {
    pub fn new(config: Config, store: SqlStore) -> Self {
        Self {
            config: Arc::new(config),
            records: Arc::new(QrCodeService::new(store)),
        }
    }
}
