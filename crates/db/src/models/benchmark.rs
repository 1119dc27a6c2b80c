//! Rows of the `benchmarks` table and the per-pair aggregate view.

use chrono::NaiveDate;
use framerate_core::benchmark::{BenchmarkKey, BenchmarkSample, PerformanceStat};
use framerate_core::error::CoreError;
use framerate_core::scoring::Bottleneck;
use framerate_core::types::{DbId, Timestamp};
use framerate_core::workload::{QualityPreset, Resolution};
use sqlx::FromRow;

/// A canonical benchmark row.
///
/// `resolution` and `settings` hold the canonical identifiers (`4K`, `Ultra`);
/// a check constraint keeps anything else out.
#[derive(Debug, Clone, FromRow)]
pub struct BenchmarkRow {
    pub id: DbId,
    pub gpu_id: String,
    pub cpu_id: String,
    pub ram_id: Option<String>,
    pub game_id: String,
    pub resolution: String,
    pub settings: String,
    pub avg_fps: f64,
    pub min_fps: Option<f64>,
    pub max_fps: Option<f64>,
    pub source: String,
    pub bottleneck: Option<String>,
    pub driver_version: Option<String>,
    pub os_version: Option<String>,
    pub test_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

impl TryFrom<BenchmarkRow> for BenchmarkSample {
    type Error = CoreError;

    fn try_from(row: BenchmarkRow) -> Result<Self, Self::Error> {
        let resolution = Resolution::try_from(row.resolution)
            .map_err(|e| CoreError::StoreUnavailable(format!("benchmark {}: {e}", row.id)))?;
        let preset = QualityPreset::try_from(row.settings)
            .map_err(|e| CoreError::StoreUnavailable(format!("benchmark {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            key: BenchmarkKey {
                gpu_id: row.gpu_id,
                cpu_id: row.cpu_id,
                game_id: row.game_id,
                resolution,
                preset,
            },
            avg_fps: row.avg_fps,
            min_fps: row.min_fps,
            max_fps: row.max_fps,
            ram_id: row.ram_id,
            source: row.source,
            // An unrecognised stored label is treated as unrecorded.
            bottleneck: row.bottleneck.as_deref().and_then(Bottleneck::parse_recorded),
            driver_version: row.driver_version,
            os_version: row.os_version,
            test_date: row.test_date,
            created_at: row.created_at,
        })
    }
}

/// Aggregate over canonical benchmarks for one (GPU, CPU) pair.
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceStatRow {
    pub gpu_id: String,
    pub cpu_id: String,
    pub benchmark_count: i64,
    pub avg_fps: f64,
    pub min_fps: f64,
    pub max_fps: f64,
}

impl From<PerformanceStatRow> for PerformanceStat {
    fn from(row: PerformanceStatRow) -> Self {
        Self {
            gpu_id: row.gpu_id,
            cpu_id: row.cpu_id,
            benchmark_count: row.benchmark_count,
            avg_fps: row.avg_fps,
            min_fps: row.min_fps,
            max_fps: row.max_fps,
        }
    }
}
