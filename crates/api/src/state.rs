use std::sync::Arc;

use framerate_core::engine::FpsEngine;
use framerate_core::memory::InMemoryStore;
use framerate_core::store::{BenchmarkStore, ComponentCatalog};
use framerate_db::{DbPool, PgBenchmarkStore, PgCatalog};

use crate::config::ServerConfig;

/// The engine over whichever store the server was configured with.
pub type Engine = FpsEngine<Arc<dyn ComponentCatalog>, Arc<dyn BenchmarkStore>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Present when the engine is backed by PostgreSQL.
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
    pub engine: Arc<Engine>,
}

impl AppState {
    /// State over the PostgreSQL catalog and benchmark store.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let catalog: Arc<dyn ComponentCatalog> = Arc::new(PgCatalog::new(pool.clone()));
        let store: Arc<dyn BenchmarkStore> = Arc::new(PgBenchmarkStore::new(pool.clone()));
        Self {
            pool: Some(pool),
            config: Arc::new(config),
            engine: Arc::new(FpsEngine::new(catalog, store)),
        }
    }

    /// State over the in-process reference catalog and sample benchmarks.
    pub fn in_memory(config: ServerConfig) -> Self {
        let memory = Arc::new(InMemoryStore::reference());
        let catalog: Arc<dyn ComponentCatalog> = memory.clone();
        let store: Arc<dyn BenchmarkStore> = memory;
        Self {
            pool: None,
            config: Arc::new(config),
            engine: Arc::new(FpsEngine::new(catalog, store)),
        }
    }

    /// Name of the backing store, as reported by `/health`.
    pub fn store_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
