//! Villa entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use villa_core::types::{DbId, Timestamp};
use villa_core::villa::{MAX_NAME_LEN, MAX_TEXT_LEN};

/// A row from the `villas` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Villa {
    pub id: DbId,
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub occupancy: i32,
    pub sqft: i32,
    pub image_url: String,
    pub amenity: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Columns supplied on insert. Id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVilla {
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub occupancy: i32,
    pub sqft: i32,
    pub image_url: String,
    pub amenity: String,
}

/// Wire representation of a villa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillaDto {
    pub id: DbId,
    pub name: String,
    pub details: String,
    pub rate: f64,
    pub occupancy: i32,
    pub sqft: i32,
    pub image_url: String,
    pub amenity: String,
}

/// DTO for creating a villa. The id is server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VillaCreateDto {
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = MAX_TEXT_LEN))]
    pub details: String,
    #[validate(range(min = 0.0, message = "Rate must not be negative"))]
    pub rate: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "Occupancy must not be negative"))]
    pub occupancy: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Sqft must not be negative"))]
    pub sqft: i32,
    #[serde(default)]
    #[validate(length(max = MAX_TEXT_LEN))]
    pub image_url: String,
    #[serde(default)]
    #[validate(length(max = MAX_TEXT_LEN))]
    pub amenity: String,
}

/// DTO for replacing a villa. `id` must match the id in the request path.
///
/// Also the shape patch documents are applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VillaUpdateDto {
    pub id: DbId,
    #[validate(length(min = 1, max = MAX_NAME_LEN, message = "Name must be 1 to 30 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = MAX_TEXT_LEN))]
    pub details: String,
    #[validate(range(min = 0.0, message = "Rate must not be negative"))]
    pub rate: f64,
    #[validate(range(min = 0, message = "Occupancy must not be negative"))]
    pub occupancy: i32,
    #[validate(range(min = 0, message = "Sqft must not be negative"))]
    pub sqft: i32,
    #[validate(length(max = MAX_TEXT_LEN))]
    pub image_url: String,
    #[serde(default)]
    #[validate(length(max = MAX_TEXT_LEN))]
    pub amenity: String,
}
