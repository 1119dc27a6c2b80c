//! PostgreSQL implementations of the engine's storage traits.
//!
//! Every `sqlx::Error` surfaces as [`CoreError::StoreUnavailable`]; the
//! engine never sees driver types.

use async_trait::async_trait;
use framerate_core::benchmark::{
    BenchmarkKey, BenchmarkSample, CreateBenchmark, NewBenchmark, NewObservation, Observation,
    PerformanceStat,
};
use framerate_core::catalog::{ComponentKind, ComponentRef, GameProfile, HardwareKind, RamKit};
use framerate_core::error::CoreError;
use framerate_core::store::{BenchmarkStore, ComponentCatalog};

use crate::repositories::{BenchmarkRepo, GameRepo, HardwareRepo, ObservationRepo, RamRepo};
use crate::DbPool;

fn unavailable(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database query failed");
    CoreError::StoreUnavailable(err.to_string())
}

/// Catalog reads backed by the reference tables.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComponentCatalog for PgCatalog {
    async fn find_hardware(
        &self,
        kind: HardwareKind,
        id: &str,
    ) -> Result<Option<ComponentRef>, CoreError> {
        let row = HardwareRepo::find_by_id(&self.pool, kind, id)
            .await
            .map_err(unavailable)?;
        Ok(row.map(Into::into))
    }

    async fn find_game(&self, id: &str) -> Result<Option<GameProfile>, CoreError> {
        let row = GameRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?;
        Ok(row.map(Into::into))
    }

    async fn find_ram(&self, id: &str) -> Result<Option<RamKit>, CoreError> {
        let row = RamRepo::find_by_id(&self.pool, id)
            .await
            .map_err(unavailable)?;
        Ok(row.map(Into::into))
    }

    async fn list_hardware(&self, kind: HardwareKind) -> Result<Vec<ComponentRef>, CoreError> {
        let rows = HardwareRepo::list(&self.pool, kind)
            .await
            .map_err(unavailable)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_games(&self) -> Result<Vec<GameProfile>, CoreError> {
        let rows = GameRepo::list(&self.pool).await.map_err(unavailable)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_ram(&self) -> Result<Vec<RamKit>, CoreError> {
        let rows = RamRepo::list(&self.pool).await.map_err(unavailable)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Benchmarks and observations backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgBenchmarkStore {
    pool: DbPool,
}

impl PgBenchmarkStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BenchmarkStore for PgBenchmarkStore {
    async fn find_benchmark(
        &self,
        key: &BenchmarkKey,
    ) -> Result<Option<BenchmarkSample>, CoreError> {
        BenchmarkRepo::find_by_key(&self.pool, key)
            .await
            .map_err(unavailable)?
            .map(BenchmarkSample::try_from)
            .transpose()
    }

    async fn create_benchmark(&self, input: &NewBenchmark) -> Result<CreateBenchmark, CoreError> {
        match BenchmarkRepo::create_if_absent(&self.pool, input)
            .await
            .map_err(unavailable)?
        {
            Some(row) => Ok(CreateBenchmark::Created(row.try_into()?)),
            None => Ok(CreateBenchmark::AlreadyExists),
        }
    }

    async fn attach_observation(&self, input: &NewObservation) -> Result<Observation, CoreError> {
        match ObservationRepo::insert(&self.pool, input).await {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(CoreError::NotFound {
                    entity: "benchmark",
                    id: input.benchmark_id.to_string(),
                })
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn recent_benchmarks(
        &self,
        kind: ComponentKind,
        id: &str,
        limit: i64,
    ) -> Result<Vec<BenchmarkSample>, CoreError> {
        BenchmarkRepo::list_recent_for(&self.pool, kind, id, limit)
            .await
            .map_err(unavailable)?
            .into_iter()
            .map(BenchmarkSample::try_from)
            .collect()
    }

    async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError> {
        let rows = BenchmarkRepo::performance_stats(&self.pool)
            .await
            .map_err(unavailable)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
