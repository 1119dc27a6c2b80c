/// Benchmark and observation primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Catalog records are keyed by stable slugs (`rtx4090`, `i9-14900k`, `cyberpunk2077`).
pub type CatalogId = String;
