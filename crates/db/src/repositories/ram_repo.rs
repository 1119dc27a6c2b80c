//! Repository for the `ram_kits` table.

use sqlx::PgPool;

use crate::models::catalog::RamKitRow;

const COLUMNS: &str = "id, size_gb, speed_mhz, memory_type, brand, created_at";

pub struct RamRepo;

impl RamRepo {
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<RamKitRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ram_kits WHERE id = $1");
        sqlx::query_as::<_, RamKitRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all kits, fastest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RamKitRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ram_kits ORDER BY speed_mhz DESC, id");
        sqlx::query_as::<_, RamKitRow>(&query).fetch_all(pool).await
    }
}
