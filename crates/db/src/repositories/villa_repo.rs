//! Repository for the `villas` table.

use async_trait::async_trait;
use sqlx::PgPool;
use villa_core::types::DbId;

use crate::models::villa::{NewVilla, Villa};
use crate::store::{StoreError, VillaFilter, VillaStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, details, rate, occupancy, sqft, image_url, amenity, created_at, updated_at";

/// Unique index enforcing case-insensitive name uniqueness.
const NAME_UNIQUE_INDEX: &str = "uq_villas_name_lower";

/// Provides CRUD operations for villas.
pub struct VillaRepo;

impl VillaRepo {
    /// Insert a new villa, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewVilla) -> Result<Villa, sqlx::Error> {
        let query = format!(
            "INSERT INTO villas (name, details, rate, occupancy, sqft, image_url, amenity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(&input.name)
            .bind(&input.details)
            .bind(input.rate)
            .bind(input.occupancy)
            .bind(input.sqft)
            .bind(&input.image_url)
            .bind(&input.amenity)
            .fetch_one(pool)
            .await
    }

    /// Find a villa by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Villa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM villas WHERE id = $1");
        sqlx::query_as::<_, Villa>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a villa by name, ignoring ASCII case.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Villa>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM villas \
             WHERE LOWER(name COLLATE \"C\") = LOWER($1 COLLATE \"C\")"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all villas ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Villa>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM villas ORDER BY id");
        sqlx::query_as::<_, Villa>(&query).fetch_all(pool).await
    }

    /// Replace every editable column of a villa and stamp `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, villa: &Villa) -> Result<Option<Villa>, sqlx::Error> {
        let query = format!(
            "UPDATE villas SET \
                name = $2, \
                details = $3, \
                rate = $4, \
                occupancy = $5, \
                sqft = $6, \
                image_url = $7, \
                amenity = $8, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Villa>(&query)
            .bind(villa.id)
            .bind(&villa.name)
            .bind(&villa.details)
            .bind(villa.rate)
            .bind(villa.occupancy)
            .bind(villa.sqft)
            .bind(&villa.image_url)
            .bind(&villa.amenity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a villa by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM villas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`VillaStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgVillaStore {
    pool: PgPool,
}

impl PgVillaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, filter: &VillaFilter) -> Result<Option<Villa>, sqlx::Error> {
        match filter {
            VillaFilter::Id(id) => VillaRepo::find_by_id(&self.pool, *id).await,
            VillaFilter::NameIgnoreCase(name) => VillaRepo::find_by_name(&self.pool, name).await,
        }
    }
}

#[async_trait]
impl VillaStore for PgVillaStore {
    async fn get_all(&self, filter: Option<&VillaFilter>) -> Result<Vec<Villa>, StoreError> {
        match filter {
            None => Ok(VillaRepo::list(&self.pool).await?),
            Some(filter) => Ok(self.find(filter).await?.into_iter().collect()),
        }
    }

    async fn get(&self, filter: &VillaFilter) -> Result<Option<Villa>, StoreError> {
        Ok(self.find(filter).await?)
    }

    async fn create(&self, input: &NewVilla) -> Result<Villa, StoreError> {
        VillaRepo::create(&self.pool, input)
            .await
            .map_err(|e| classify_write_error(e, &input.name))
    }

    async fn update(&self, villa: &Villa) -> Result<Option<Villa>, StoreError> {
        VillaRepo::update(&self.pool, villa)
            .await
            .map_err(|e| classify_write_error(e, &villa.name))
    }

    async fn remove(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(VillaRepo::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}

/// Turn a violation of the name index into [`StoreError::DuplicateName`].
///
/// PostgreSQL reports unique violations with SQLSTATE 23505.
fn classify_write_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some(NAME_UNIQUE_INDEX)
        {
            tracing::debug!(name, "Villa name collides with an existing villa");
            return StoreError::DuplicateName(name.to_string());
        }
    }
    StoreError::Database(err)
}
