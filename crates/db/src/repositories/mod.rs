//! Repository layer.
//!
//! [`VillaRepo`] is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. [`PgVillaStore`] and
//! [`InMemoryVillaStore`] are the two [`crate::store::VillaStore`] backends.

pub mod memory_repo;
pub mod villa_repo;

pub use memory_repo::InMemoryVillaStore;
pub use villa_repo::{PgVillaStore, VillaRepo};
