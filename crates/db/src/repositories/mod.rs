//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod benchmark_repo;
pub mod game_repo;
pub mod hardware_repo;
pub mod observation_repo;
pub mod ram_repo;

pub use benchmark_repo::BenchmarkRepo;
pub use game_repo::GameRepo;
pub use hardware_repo::HardwareRepo;
pub use observation_repo::ObservationRepo;
pub use ram_repo::RamRepo;
