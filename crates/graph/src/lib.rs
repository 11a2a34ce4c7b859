//! In-memory transaction relationship graph.
//!
//! Implements [`surge_core::GraphQuery`] so rule evaluation can run against
//! recorded history without a database.

pub mod store;

pub use store::*;
