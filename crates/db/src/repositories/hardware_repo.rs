//! Repository for the `gpus` and `cpus` tables.

use framerate_core::catalog::HardwareKind;
use sqlx::PgPool;

use crate::models::catalog::HardwareRow;

/// Column list shared by both hardware tables.
const COLUMNS: &str = "id, name, tier, created_at";

/// Provides lookups over GPU and CPU catalog entries.
pub struct HardwareRepo;

impl HardwareRepo {
    fn table(kind: HardwareKind) -> &'static str {
        match kind {
            HardwareKind::Gpu => "gpus",
            HardwareKind::Cpu => "cpus",
        }
    }

    /// Find a component by its slug within one kind's table.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: HardwareKind,
        id: &str,
    ) -> Result<Option<HardwareRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", Self::table(kind));
        sqlx::query_as::<_, HardwareRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every component of a kind, ordered by id.
    pub async fn list(pool: &PgPool, kind: HardwareKind) -> Result<Vec<HardwareRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id", Self::table(kind));
        sqlx::query_as::<_, HardwareRow>(&query).fetch_all(pool).await
    }
}
