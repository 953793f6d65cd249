//! In-memory villa list.
//!
//! Serves the same contract as [`super::PgVillaStore`] without a database.
//! Used for local runs (`VILLA_STORE=memory`) and by the HTTP tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use villa_core::types::DbId;
use villa_core::villa::{names_match, next_id};

use crate::models::villa::{NewVilla, Villa};
use crate::store::{StoreError, VillaFilter, VillaStore};

/// [`VillaStore`] holding rows in a `Vec`, ordered by id.
///
/// Name uniqueness and id assignment happen under the write lock, so
/// concurrent creates cannot both claim a name or an id.
#[derive(Debug, Default)]
pub struct InMemoryVillaStore {
    villas: RwLock<Vec<Villa>>,
}

impl InMemoryVillaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given rows.
    pub fn with_villas(mut villas: Vec<Villa>) -> Self {
        villas.sort_by_key(|v| v.id);
        Self {
            villas: RwLock::new(villas),
        }
    }

    /// A store holding the two starter villas.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let starter = |id: DbId, name: &str, occupancy: i32, sqft: i32| Villa {
            id,
            name: name.to_string(),
            details: String::new(),
            rate: 0.0,
            occupancy,
            sqft,
            image_url: String::new(),
            amenity: String::new(),
            created_at: now,
            updated_at: now,
        };
        Self::with_villas(vec![
            starter(1, "Pool View", 4, 100),
            starter(2, "Beach View", 3, 300),
        ])
    }
}

#[async_trait]
impl VillaStore for InMemoryVillaStore {
    async fn get_all(&self, filter: Option<&VillaFilter>) -> Result<Vec<Villa>, StoreError> {
        let villas = self.villas.read().await;
        Ok(villas
            .iter()
            .filter(|v| filter.map_or(true, |f| f.matches(v)))
            .cloned()
            .collect())
    }

    async fn get(&self, filter: &VillaFilter) -> Result<Option<Villa>, StoreError> {
        let villas = self.villas.read().await;
        Ok(villas.iter().find(|v| filter.matches(v)).cloned())
    }

    async fn create(&self, input: &NewVilla) -> Result<Villa, StoreError> {
        let mut villas = self.villas.write().await;
        if villas.iter().any(|v| names_match(&v.name, &input.name)) {
            return Err(StoreError::DuplicateName(input.name.clone()));
        }

        let now = Utc::now();
        let villa = Villa {
            id: next_id(villas.iter().map(|v| v.id).max()),
            name: input.name.clone(),
            details: input.details.clone(),
            rate: input.rate,
            occupancy: input.occupancy,
            sqft: input.sqft,
            image_url: input.image_url.clone(),
            amenity: input.amenity.clone(),
            created_at: now,
            updated_at: now,
        };
        villas.push(villa.clone());
        Ok(villa)
    }

    async fn update(&self, villa: &Villa) -> Result<Option<Villa>, StoreError> {
        let mut villas = self.villas.write().await;
        if villas
            .iter()
            .any(|v| v.id != villa.id && names_match(&v.name, &villa.name))
        {
            return Err(StoreError::DuplicateName(villa.name.clone()));
        }

        let Some(slot) = villas.iter_mut().find(|v| v.id == villa.id) else {
            return Ok(None);
        };
        *slot = Villa {
            created_at: slot.created_at,
            updated_at: Utc::now(),
            ..villa.clone()
        };
        Ok(Some(slot.clone()))
    }

    async fn remove(&self, id: DbId) -> Result<bool, StoreError> {
        let mut villas = self.villas.write().await;
        let before = villas.len();
        villas.retain(|v| v.id != id);
        Ok(villas.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
