//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching a table row and its
//! conversion into the engine's domain type.

pub mod benchmark;
pub mod catalog;
pub mod observation;
