//! Repository for the `benchmark_observations` table (append-only).

use framerate_core::benchmark::NewObservation;
use framerate_core::types::DbId;
use sqlx::PgPool;

use crate::models::observation::ObservationRow;

const COLUMNS: &str = "\
    id, benchmark_id, submitter_id, avg_fps, min_fps, max_fps, \
    notes, confidence_rating, hardware_match, created_at";

const INSERT_COLUMNS: &str = "\
    benchmark_id, submitter_id, avg_fps, min_fps, max_fps, \
    notes, confidence_rating, hardware_match";

pub struct ObservationRepo;

impl ObservationRepo {
    pub async fn insert(
        pool: &PgPool,
        input: &NewObservation,
    ) -> Result<ObservationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO benchmark_observations ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ObservationRow>(&query)
            .bind(input.benchmark_id)
            .bind(&input.submitter_id)
            .bind(input.avg_fps)
            .bind(input.min_fps)
            .bind(input.max_fps)
            .bind(&input.notes)
            .bind(input.confidence_rating)
            .bind(input.hardware_match)
            .fetch_one(pool)
            .await
    }

    /// Observations for one benchmark, oldest first.
    pub async fn list_for_benchmark(
        pool: &PgPool,
        benchmark_id: DbId,
    ) -> Result<Vec<ObservationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM benchmark_observations \
             WHERE benchmark_id = $1 \
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ObservationRow>(&query)
            .bind(benchmark_id)
            .fetch_all(pool)
            .await
    }
}
