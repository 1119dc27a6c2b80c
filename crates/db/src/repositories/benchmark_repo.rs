//! Repository for the `benchmarks` table.
//!
//! At most one row exists per configuration, enforced by the
//! `uq_benchmarks_configuration` constraint.

use framerate_core::benchmark::{BenchmarkKey, NewBenchmark};
use framerate_core::catalog::ComponentKind;
use sqlx::PgPool;

use crate::models::benchmark::{BenchmarkRow, PerformanceStatRow};

/// Column list for `benchmarks` SELECT queries (includes `id` and `created_at`).
const COLUMNS: &str = "\
    id, gpu_id, cpu_id, ram_id, game_id, resolution, settings, \
    avg_fps, min_fps, max_fps, source, bottleneck, \
    driver_version, os_version, test_date, created_at";

/// Column list for INSERT statements (excludes auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    gpu_id, cpu_id, ram_id, game_id, resolution, settings, \
    avg_fps, min_fps, max_fps, source, bottleneck, \
    driver_version, os_version, test_date";

/// Provides query operations for canonical benchmarks.
pub struct BenchmarkRepo;

impl BenchmarkRepo {
    /// Exact-match lookup on all five configuration columns.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &BenchmarkKey,
    ) -> Result<Option<BenchmarkRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM benchmarks \
             WHERE gpu_id = $1 AND cpu_id = $2 AND game_id = $3 \
               AND resolution = $4 AND settings = $5"
        );
        sqlx::query_as::<_, BenchmarkRow>(&query)
            .bind(&key.gpu_id)
            .bind(&key.cpu_id)
            .bind(&key.game_id)
            .bind(key.resolution.id())
            .bind(key.preset.id())
            .fetch_optional(pool)
            .await
    }

    /// Insert a benchmark unless its configuration already has one.
    ///
    /// Returns `None` when the unique constraint absorbed the insert, which
    /// covers a concurrent writer winning the race.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &NewBenchmark,
    ) -> Result<Option<BenchmarkRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO benchmarks ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT ON CONSTRAINT uq_benchmarks_configuration DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BenchmarkRow>(&query)
            .bind(&input.key.gpu_id)
            .bind(&input.key.cpu_id)
            .bind(&input.ram_id)
            .bind(&input.key.game_id)
            .bind(input.key.resolution.id())
            .bind(input.key.preset.id())
            .bind(input.avg_fps)
            .bind(input.min_fps)
            .bind(input.max_fps)
            .bind(&input.source)
            .bind(input.bottleneck.map(|b| b.as_str()))
            .bind(&input.driver_version)
            .bind(&input.os_version)
            .bind(input.test_date)
            .fetch_optional(pool)
            .await
    }

    /// Most recent benchmarks involving a catalog entity, newest first.
    ///
    /// RAM matches on the kit the sample was recorded with.
    pub async fn list_recent_for(
        pool: &PgPool,
        kind: ComponentKind,
        id: &str,
        limit: i64,
    ) -> Result<Vec<BenchmarkRow>, sqlx::Error> {
        let column = match kind {
            ComponentKind::Gpu => "gpu_id",
            ComponentKind::Cpu => "cpu_id",
            ComponentKind::Game => "game_id",
            ComponentKind::Ram => "ram_id",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM benchmarks \
             WHERE {column} = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, BenchmarkRow>(&query)
            .bind(id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Average FPS statistics per (GPU, CPU) pair.
    pub async fn performance_stats(pool: &PgPool) -> Result<Vec<PerformanceStatRow>, sqlx::Error> {
        let query = "\
            SELECT gpu_id, cpu_id, \
                COUNT(*) AS benchmark_count, \
                AVG(avg_fps) AS avg_fps, \
                MIN(avg_fps) AS min_fps, \
                MAX(avg_fps) AS max_fps \
            FROM benchmarks \
            GROUP BY gpu_id, cpu_id \
            ORDER BY gpu_id, cpu_id";
        sqlx::query_as::<_, PerformanceStatRow>(query)
            .fetch_all(pool)
            .await
    }
}
