//! Shared application state for the web server.

use std::sync::Arc;

use epifund_common::AppConfig;
use epifund_data::DataStore;

/// Shared state injected into every Axum handler. Built once in `main`
/// before the server accepts traffic; read-only afterwards.
pub struct AppState {
    pub config: AppConfig,
    pub store: DataStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: DataStore) -> Self {
        Self { config, store }
    }
}

pub type SharedState = Arc<AppState>;
