//! Application state management

use std::sync::Arc;

use prometheus::Registry;

use crate::config::Config;
use crate::exporter;
use crate::storage::ObjectStore;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to register process metrics: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: Arc<dyn ObjectStore>,
    process_registry: Registry,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Result<Self, StateError> {
        let process_registry = exporter::build_info_registry()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                process_registry,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the object store probes list through
    pub fn store(&self) -> &dyn ObjectStore {
        self.inner.store.as_ref()
    }

    /// Get the registry served on the metrics path
    pub fn process_registry(&self) -> &Registry {
        &self.inner.process_registry
    }
}
