//! The villa store contract.
//!
//! Handlers talk to `Arc<dyn VillaStore>` and never know whether rows live
//! in PostgreSQL ([`crate::repositories::PgVillaStore`]) or in memory
//! ([`crate::repositories::InMemoryVillaStore`]).
//!
//! Reads come in two flavours:
//! - [`VillaStore::get`] returns a detached copy. Mutating it has no effect
//!   on the store.
//! - `get_tracked` (on `dyn VillaStore`) returns a [`TrackedVilla`] handle.
//!   Edits made through the handle are written back with
//!   [`TrackedVilla::flush`] or deleted with [`TrackedVilla::remove`].

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use villa_core::types::DbId;
use villa_core::villa::names_match;

use crate::models::villa::{NewVilla, Villa};

/// Predicate selecting villas.
#[derive(Debug, Clone, PartialEq)]
pub enum VillaFilter {
    /// The villa with this id.
    Id(DbId),
    /// Villas whose name equals this one, ignoring case.
    NameIgnoreCase(String),
}

impl VillaFilter {
    pub fn matches(&self, villa: &Villa) -> bool {
        match self {
            VillaFilter::Id(id) => villa.id == *id,
            VillaFilter::NameIgnoreCase(name) => names_match(&villa.name, name),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The name collides (case-insensitively) with another villa.
    #[error("A villa named '{0}' already exists")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for villas.
#[async_trait]
pub trait VillaStore: Send + Sync {
    /// All villas matching `filter` (every villa when `None`), ordered by id.
    async fn get_all(&self, filter: Option<&VillaFilter>) -> Result<Vec<Villa>, StoreError>;

    /// The first villa matching `filter`, as a detached copy.
    async fn get(&self, filter: &VillaFilter) -> Result<Option<Villa>, StoreError>;

    /// Insert a villa. The store assigns the id and both timestamps.
    async fn create(&self, input: &NewVilla) -> Result<Villa, StoreError>;

    /// Replace the stored row with `villa.id`, stamping `updated_at`.
    ///
    /// Returns `None` if no row with that id exists. `created_at` is kept
    /// from the stored row.
    async fn update(&self, villa: &Villa) -> Result<Option<Villa>, StoreError>;

    /// Delete the villa with `id`. Returns `false` if nothing was deleted.
    async fn remove(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

impl<'a> dyn VillaStore + 'a {
    /// The first villa matching `filter`, as a handle bound to this store.
    pub async fn get_tracked(
        &self,
        filter: &VillaFilter,
    ) -> Result<Option<TrackedVilla<'_>>, StoreError> {
        Ok(self.get(filter).await?.map(|villa| TrackedVilla {
            store: self,
            id: villa.id,
            villa,
        }))
    }
}

/// A fetched villa that writes back to the store it came from.
///
/// The id is pinned at fetch time: [`flush`](Self::flush) and
/// [`remove`](Self::remove) always target the fetched row, whatever the
/// handle's `id` field says by then.
pub struct TrackedVilla<'s> {
    store: &'s dyn VillaStore,
    id: DbId,
    villa: Villa,
}

impl TrackedVilla<'_> {
    /// Persist the current state of the handle.
    ///
    /// Returns `None` if the row was deleted after it was fetched.
    pub async fn flush(mut self) -> Result<Option<Villa>, StoreError> {
        self.villa.id = self.id;
        self.store.update(&self.villa).await
    }

    /// Delete the fetched row.
    pub async fn remove(self) -> Result<bool, StoreError> {
        self.store.remove(self.id).await
    }
}

impl Deref for TrackedVilla<'_> {
    type Target = Villa;

    fn deref(&self) -> &Villa {
        &self.villa
    }
}

impl DerefMut for TrackedVilla<'_> {
    fn deref_mut(&mut self) -> &mut Villa {
        &mut self.villa
    }
}
