//! Repository for the `games` table.

use sqlx::PgPool;

use crate::models::catalog::GameRow;

const COLUMNS: &str =
    "id, name, genre, gpu_intensive, cpu_intensive, ray_tracing_support, created_at";

pub struct GameRepo;

impl GameRepo {
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<GameRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, GameRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all games alphabetically by display name.
    pub async fn list(pool: &PgPool) -> Result<Vec<GameRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY name");
        sqlx::query_as::<_, GameRow>(&query).fetch_all(pool).await
    }
}
