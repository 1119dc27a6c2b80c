//! FPS estimation engine.
//!
//! Pure domain logic for estimating gaming frame rates from a hardware/game
//! configuration: the tier scoring model, the heuristic fallback, bottleneck
//! classification, and normalisation of crowd-submitted samples. Storage is
//! reached only through the traits in [`store`].

pub mod benchmark;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod estimation;
pub mod memory;
pub mod scoring;
pub mod store;
pub mod submission;
pub mod types;
pub mod workload;
