//! Storage abstractions the engine depends on.
//!
//! The engine never touches a concrete storage technology. Implementations
//! report every backend failure as [`CoreError::StoreUnavailable`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::benchmark::{
    BenchmarkKey, BenchmarkSample, CreateBenchmark, NewBenchmark, NewObservation, Observation,
    PerformanceStat,
};
use crate::catalog::{ComponentKind, ComponentRef, GameProfile, HardwareKind, RamKit};
use crate::error::CoreError;

/// Read-only access to the reference catalog.
#[async_trait]
pub trait ComponentCatalog: Send + Sync {
    async fn find_hardware(
        &self,
        kind: HardwareKind,
        id: &str,
    ) -> Result<Option<ComponentRef>, CoreError>;

    async fn find_game(&self, id: &str) -> Result<Option<GameProfile>, CoreError>;

    async fn find_ram(&self, id: &str) -> Result<Option<RamKit>, CoreError>;

    async fn list_hardware(&self, kind: HardwareKind) -> Result<Vec<ComponentRef>, CoreError>;

    async fn list_games(&self) -> Result<Vec<GameProfile>, CoreError>;

    async fn list_ram(&self) -> Result<Vec<RamKit>, CoreError>;
}

/// Empirical samples and the observations attached to them.
#[async_trait]
pub trait BenchmarkStore: Send + Sync {
    async fn find_benchmark(&self, key: &BenchmarkKey)
        -> Result<Option<BenchmarkSample>, CoreError>;

    /// Create the canonical sample for a key.
    ///
    /// Must return [`CreateBenchmark::AlreadyExists`] rather than an error
    /// when the key is already taken, including by a concurrent writer.
    async fn create_benchmark(&self, input: &NewBenchmark) -> Result<CreateBenchmark, CoreError>;

    async fn attach_observation(&self, input: &NewObservation) -> Result<Observation, CoreError>;

    /// Most recent samples involving a catalog entity, newest first.
    async fn recent_benchmarks(
        &self,
        kind: ComponentKind,
        id: &str,
        limit: i64,
    ) -> Result<Vec<BenchmarkSample>, CoreError>;

    async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError>;
}

#[async_trait]
impl<T: ComponentCatalog + ?Sized> ComponentCatalog for Arc<T> {
    async fn find_hardware(
        &self,
        kind: HardwareKind,
        id: &str,
    ) -> Result<Option<ComponentRef>, CoreError> {
        (**self).find_hardware(kind, id).await
    }

    async fn find_game(&self, id: &str) -> Result<Option<GameProfile>, CoreError> {
        (**self).find_game(id).await
    }

    async fn find_ram(&self, id: &str) -> Result<Option<RamKit>, CoreError> {
        (**self).find_ram(id).await
    }

    async fn list_hardware(&self, kind: HardwareKind) -> Result<Vec<ComponentRef>, CoreError> {
        (**self).list_hardware(kind).await
    }

    async fn list_games(&self) -> Result<Vec<GameProfile>, CoreError> {
        (**self).list_games().await
    }

    async fn list_ram(&self) -> Result<Vec<RamKit>, CoreError> {
        (**self).list_ram().await
    }
}

#[async_trait]
impl<T: BenchmarkStore + ?Sized> BenchmarkStore for Arc<T> {
    async fn find_benchmark(
        &self,
        key: &BenchmarkKey,
    ) -> Result<Option<BenchmarkSample>, CoreError> {
        (**self).find_benchmark(key).await
    }

    async fn create_benchmark(&self, input: &NewBenchmark) -> Result<CreateBenchmark, CoreError> {
        (**self).create_benchmark(input).await
    }

    async fn attach_observation(&self, input: &NewObservation) -> Result<Observation, CoreError> {
        (**self).attach_observation(input).await
    }

    async fn recent_benchmarks(
        &self,
        kind: ComponentKind,
        id: &str,
        limit: i64,
    ) -> Result<Vec<BenchmarkSample>, CoreError> {
        (**self).recent_benchmarks(kind, id, limit).await
    }

    async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError> {
        (**self).performance_stats().await
    }
}
