//! Rows of the `benchmark_observations` table.

use framerate_core::benchmark::Observation;
use framerate_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ObservationRow {
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

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Self {
            id: row.id,
            benchmark_id: row.benchmark_id,
            submitter_id: row.submitter_id,
            avg_fps: row.avg_fps,
            min_fps: row.min_fps,
            max_fps: row.max_fps,
            notes: row.notes,
            confidence_rating: row.confidence_rating,
            hardware_match: row.hardware_match,
            created_at: row.created_at,
        }
    }
}
