//! Benchmark samples, submission observations, and aggregate statistics.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::catalog::ComponentKind;
use crate::scoring::Bottleneck;
use crate::types::{CatalogId, DbId, Timestamp};
use crate::workload::{QualityPreset, Resolution};

/// Provenance tag for samples created from user submissions.
pub const SOURCE_COMMUNITY: &str = "community";

/// Submitter recorded when a submission names none.
pub const ANONYMOUS_SUBMITTER: &str = "anonymous";

/// Confidence assigned to submissions, which carry no rating of their own.
pub const DEFAULT_CONFIDENCE_RATING: i16 = 4;

/// The exact configuration a canonical benchmark is unique on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkKey {
    pub gpu_id: CatalogId,
    pub cpu_id: CatalogId,
    pub game_id: CatalogId,
    pub resolution: Resolution,
    #[serde(rename = "settings")]
    pub preset: QualityPreset,
}

impl BenchmarkKey {
    /// Whether the given catalog entity takes part in this configuration.
    ///
    /// RAM is not part of the key; see [`BenchmarkSample::involves`].
    pub fn involves(&self, kind: ComponentKind, id: &str) -> bool {
        match kind {
            ComponentKind::Gpu => self.gpu_id == id,
            ComponentKind::Cpu => self.cpu_id == id,
            ComponentKind::Game => self.game_id == id,
            ComponentKind::Ram => false,
        }
    }
}

/// A canonical empirical measurement.
///
/// RAM, driver, OS, test date and recorded bottleneck are passive metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSample {
    pub id: DbId,
    #[serde(flatten)]
    pub key: BenchmarkKey,
    pub avg_fps: f64,
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
    pub ram_id: Option<CatalogId>,
    pub source: String,
    pub bottleneck: Option<Bottleneck>,
    pub driver_version: Option<String>,
    pub os_version: Option<String>,
    pub test_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

impl BenchmarkSample {
    /// Whether the given catalog entity takes part in this sample, RAM included.
    pub fn involves(&self, kind: ComponentKind, id: &str) -> bool {
        match kind {
            ComponentKind::Ram => self.ram_id.as_deref() == Some(id),
            _ => self.key.involves(kind, id),
        }
    }
}

/// Input for creating a canonical benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBenchmark {
    pub key: BenchmarkKey,
    pub avg_fps: f64,
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
    pub ram_id: Option<CatalogId>,
    pub source: String,
    pub bottleneck: Option<Bottleneck>,
    pub driver_version: Option<String>,
    pub os_version: Option<String>,
    pub test_date: Option<NaiveDate>,
}

impl NewBenchmark {
    /// A sample with only the measured figures and a provenance tag.
    pub fn measured(key: BenchmarkKey, avg_fps: f64, min_fps: f64, max_fps: f64, source: &str) -> Self {
        Self {
            key,
            avg_fps,
            min_fps: Some(min_fps),
            max_fps: Some(max_fps),
            ram_id: None,
            source: source.to_string(),
            bottleneck: None,
            driver_version: None,
            os_version: None,
            test_date: None,
        }
    }

    /// The stored form of this input under an assigned id, created now.
    pub fn into_sample(self, id: DbId) -> BenchmarkSample {
        BenchmarkSample {
            id,
            key: self.key,
            avg_fps: self.avg_fps,
            min_fps: self.min_fps,
            max_fps: self.max_fps,
            ram_id: self.ram_id,
            source: self.source,
            bottleneck: self.bottleneck,
            driver_version: self.driver_version,
            os_version: self.os_version,
            test_date: self.test_date,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of attempting to create a canonical benchmark.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateBenchmark {
    Created(BenchmarkSample),
    /// Another writer already holds the key; the caller re-reads and appends.
    AlreadyExists,
}

/// A user submission linked to a canonical benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: DbId,
    pub benchmark_id: DbId,
    pub submitter_id: String,
    pub avg_fps: f64,
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
    pub notes: Option<String>,
    pub confidence_rating: i16,
    pub hardware_match: bool,
    pub created_at: Timestamp,
}

/// Input for attaching an observation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObservation {
    pub benchmark_id: DbId,
    pub submitter_id: String,
    pub avg_fps: f64,
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
    pub notes: Option<String>,
    pub confidence_rating: i16,
    pub hardware_match: bool,
}

/// Canonical samples grouped by (GPU, CPU) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStat {
    pub gpu_id: CatalogId,
    pub cpu_id: CatalogId,
    pub benchmark_count: i64,
    /// Mean of `avgFps` across the group.
    #[serde(rename = "avgFPS")]
    pub avg_fps: f64,
    /// Lowest `avgFps` in the group.
    #[serde(rename = "minFPS")]
    pub min_fps: f64,
    /// Highest `avgFps` in the group.
    #[serde(rename = "maxFPS")]
    pub max_fps: f64,
}
