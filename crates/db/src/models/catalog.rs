//! Rows of the reference catalog tables (`gpus`, `cpus`, `games`, `ram_kits`).

use framerate_core::catalog::{ComponentRef, GameProfile, RamKit};
use framerate_core::types::Timestamp;
use sqlx::FromRow;

/// A row of `gpus` or `cpus`; both tables share one shape.
#[derive(Debug, Clone, FromRow)]
pub struct HardwareRow {
    pub id: String,
    pub name: String,
    pub tier: String,
    pub created_at: Timestamp,
}

impl From<HardwareRow> for ComponentRef {
    fn from(row: HardwareRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            tier: row.tier,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct GameRow {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub gpu_intensive: bool,
    pub cpu_intensive: bool,
    pub ray_tracing_support: bool,
    pub created_at: Timestamp,
}

impl From<GameRow> for GameProfile {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            genre: row.genre,
            gpu_intensive: row.gpu_intensive,
            cpu_intensive: row.cpu_intensive,
            ray_tracing_support: row.ray_tracing_support,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RamKitRow {
    pub id: String,
    pub size_gb: i32,
    pub speed_mhz: i32,
    pub memory_type: String,
    pub brand: String,
    pub created_at: Timestamp,
}

impl From<RamKitRow> for RamKit {
    fn from(row: RamKitRow) -> Self {
        Self {
            id: row.id,
            size_gb: row.size_gb,
            speed_mhz: row.speed_mhz,
            memory_type: row.memory_type,
            brand: row.brand,
        }
    }
}
