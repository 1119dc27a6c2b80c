//! The engine façade: owns the injected catalog and store and exposes the
//! estimate, submit and read operations.
//!
//! Estimation lives in [`crate::estimation`], submission handling in
//! [`crate::submission`]; this module holds construction, reference
//! resolution and the catalog/statistics passthroughs.

use crate::benchmark::{BenchmarkKey, PerformanceStat};
use crate::catalog::{
    CatalogEntry, CatalogListing, ComponentDetails, ComponentKind, ComponentRef, GameProfile,
    HardwareKind,
};
use crate::error::{CoreError, UnresolvedRef};
use crate::store::{BenchmarkStore, ComponentCatalog};
use crate::workload::{QualityPreset, Resolution};

/// Number of recent samples included in a component detail view.
pub const RECENT_BENCHMARK_LIMIT: i64 = 5;

/// FPS estimation engine over an injected catalog and benchmark store.
///
/// Holds no state of its own; every call re-reads the store.
#[derive(Debug, Clone)]
pub struct FpsEngine<C, S> {
    catalog: C,
    store: S,
}

/// The five configuration references exactly as a caller supplied them.
#[derive(Debug, Clone, Copy)]
pub struct ConfigurationRefs<'a> {
    pub gpu_id: &'a str,
    pub cpu_id: &'a str,
    pub game_id: &'a str,
    pub resolution: &'a str,
    pub settings: &'a str,
}

/// A configuration whose every reference resolved against the catalog.
#[derive(Debug, Clone)]
pub struct ResolvedConfiguration {
    pub gpu: ComponentRef,
    pub cpu: ComponentRef,
    pub game: GameProfile,
    pub resolution: Resolution,
    pub preset: QualityPreset,
}

impl ResolvedConfiguration {
    pub fn key(&self) -> BenchmarkKey {
        BenchmarkKey {
            gpu_id: self.gpu.id.clone(),
            cpu_id: self.cpu.id.clone(),
            game_id: self.game.id.clone(),
            resolution: self.resolution,
            preset: self.preset,
        }
    }
}

impl<C, S> FpsEngine<C, S>
where
    C: ComponentCatalog,
    S: BenchmarkStore,
{
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve all five references, reporting every one that fails.
    pub async fn resolve(
        &self,
        refs: ConfigurationRefs<'_>,
    ) -> Result<ResolvedConfiguration, CoreError> {
        let (gpu, cpu, game) = tokio::join!(
            self.catalog.find_hardware(HardwareKind::Gpu, refs.gpu_id),
            self.catalog.find_hardware(HardwareKind::Cpu, refs.cpu_id),
            self.catalog.find_game(refs.game_id),
        );
        let (gpu, cpu, game) = (gpu?, cpu?, game?);
        let resolution = Resolution::parse(refs.resolution);
        let preset = QualityPreset::parse(refs.settings);

        let mut unresolved = Vec::new();
        if gpu.is_none() {
            unresolved.push(UnresolvedRef::new("gpuId", refs.gpu_id));
        }
        if cpu.is_none() {
            unresolved.push(UnresolvedRef::new("cpuId", refs.cpu_id));
        }
        if game.is_none() {
            unresolved.push(UnresolvedRef::new("gameId", refs.game_id));
        }
        if resolution.is_none() {
            unresolved.push(UnresolvedRef::new("resolution", refs.resolution));
        }
        if preset.is_none() {
            unresolved.push(UnresolvedRef::new("settings", refs.settings));
        }

        match (gpu, cpu, game, resolution, preset) {
            (Some(gpu), Some(cpu), Some(game), Some(resolution), Some(preset)) => {
                Ok(ResolvedConfiguration {
                    gpu,
                    cpu,
                    game,
                    resolution,
                    preset,
                })
            }
            _ => Err(CoreError::InvalidConfiguration { unresolved }),
        }
    }

    /// Catalog contents shaped for a selection form.
    pub async fn list_catalog(&self) -> Result<CatalogListing, CoreError> {
        let (gpus, cpus, games, rams) = tokio::join!(
            self.catalog.list_hardware(HardwareKind::Gpu),
            self.catalog.list_hardware(HardwareKind::Cpu),
            self.catalog.list_games(),
            self.catalog.list_ram(),
        );

        Ok(CatalogListing {
            gpus: gpus?,
            cpus: cpus?,
            games: games?,
            rams: rams?,
            resolutions: Resolution::ALL.into_iter().map(Resolution::option).collect(),
            presets: QualityPreset::ALL
                .into_iter()
                .map(QualityPreset::option)
                .collect(),
        })
    }

    /// A catalog record plus its most recent benchmark samples.
    pub async fn component_details(
        &self,
        kind: ComponentKind,
        id: &str,
    ) -> Result<ComponentDetails, CoreError> {
        let component = match kind {
            ComponentKind::Gpu => self
                .catalog
                .find_hardware(HardwareKind::Gpu, id)
                .await?
                .map(CatalogEntry::Hardware),
            ComponentKind::Cpu => self
                .catalog
                .find_hardware(HardwareKind::Cpu, id)
                .await?
                .map(CatalogEntry::Hardware),
            ComponentKind::Game => self.catalog.find_game(id).await?.map(CatalogEntry::Game),
            ComponentKind::Ram => self.catalog.find_ram(id).await?.map(CatalogEntry::Ram),
        };
        let component = component.ok_or_else(|| CoreError::NotFound {
            entity: kind.as_str(),
            id: id.to_string(),
        })?;

        let recent_benchmarks = self
            .store
            .recent_benchmarks(kind, id, RECENT_BENCHMARK_LIMIT)
            .await?;

        Ok(ComponentDetails {
            kind,
            component,
            recent_benchmarks,
        })
    }

    pub async fn performance_stats(&self) -> Result<Vec<PerformanceStat>, CoreError> {
        self.store.performance_stats().await
    }
}
