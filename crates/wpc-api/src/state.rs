//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! - **Passes** behind the [`PassRepository`] seam.
//! - **Templates** in a generic in-memory [`Store`], seeded at startup.
//! - **Renderer** for QR previews.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use wpc_core::{builtin_templates, PassTemplate};
use wpc_render::{BarcodeRenderer, QrRenderer};

use crate::config::AppConfig;
use crate::repository::{InMemoryPassRepository, PassRepository};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// The lock is `parking_lot` and is never held across `.await` points.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<String, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, id: impl Into<String>, value: T) -> Option<T> {
        self.data.write().insert(id.into(), value)
    }

    /// Insert only if `id` is vacant. Check and insert happen under one
    /// write lock. Returns `false` when the key was already taken.
    pub fn insert_if_absent(&self, id: impl Into<String>, value: T) -> bool {
        use std::collections::hash_map::Entry;
        match self.data.write().entry(id.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Retrieve a record by ID.
    pub fn get(&self, id: &str) -> Option<T> {
        self.data.read().get(id).cloned()
    }

    /// List all records, in no particular order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().values().cloned().collect()
    }

    /// Remove a record by ID.
    pub fn remove(&self, id: &str) -> Option<T> {
        self.data.write().remove(id)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub passes: Arc<dyn PassRepository>,
    pub templates: Store<PassTemplate>,
    pub renderer: Arc<dyn BarcodeRenderer>,
    /// Installed Prometheus recorder, when the binary set one up.
    pub prometheus: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("passes", &self.passes.len())
            .field("templates", &self.templates.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State with default configuration and an empty pass repository.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// State with the given configuration, the in-memory repository, the QR
    /// renderer and the built-in templates.
    pub fn with_config(config: AppConfig) -> Self {
        let templates = Store::new();
        for template in builtin_templates(Utc::now()) {
            templates.insert(template.id.clone(), template);
        }
        Self {
            config,
            passes: Arc::new(InMemoryPassRepository::new()),
            templates,
            renderer: Arc::new(QrRenderer),
            prometheus: None,
        }
    }

    /// Attach an installed Prometheus recorder so `/metrics` can render it.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
