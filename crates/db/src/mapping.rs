//! Field-by-field conversions between villa rows and DTOs.
//!
//! Every conversion is total. Server-owned columns (`id` on insert,
//! `created_at`, `updated_at`) never flow from a DTO into a row.

use crate::models::villa::{NewVilla, Villa, VillaCreateDto, VillaDto, VillaUpdateDto};

impl From<&Villa> for VillaDto {
    fn from(villa: &Villa) -> Self {
        Self {
            id: villa.id,
            name: villa.name.clone(),
            details: villa.details.clone(),
            rate: villa.rate,
            occupancy: villa.occupancy,
            sqft: villa.sqft,
            image_url: villa.image_url.clone(),
            amenity: villa.amenity.clone(),
        }
    }
}

impl From<Villa> for VillaDto {
    fn from(villa: Villa) -> Self {
        Self {
            id: villa.id,
            name: villa.name,
            details: villa.details,
            rate: villa.rate,
            occupancy: villa.occupancy,
            sqft: villa.sqft,
            image_url: villa.image_url,
            amenity: villa.amenity,
        }
    }
}

impl From<&Villa> for VillaUpdateDto {
    fn from(villa: &Villa) -> Self {
        VillaDto::from(villa).into()
    }
}

impl From<VillaDto> for VillaUpdateDto {
    fn from(dto: VillaDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            details: dto.details,
            rate: dto.rate,
            occupancy: dto.occupancy,
            sqft: dto.sqft,
            image_url: dto.image_url,
            amenity: dto.amenity,
        }
    }
}

impl From<VillaUpdateDto> for VillaDto {
    fn from(dto: VillaUpdateDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            details: dto.details,
            rate: dto.rate,
            occupancy: dto.occupancy,
            sqft: dto.sqft,
            image_url: dto.image_url,
            amenity: dto.amenity,
        }
    }
}

impl From<VillaCreateDto> for NewVilla {
    fn from(dto: VillaCreateDto) -> Self {
        Self {
            name: dto.name,
            details: dto.details,
            rate: dto.rate,
            occupancy: dto.occupancy,
            sqft: dto.sqft,
            image_url: dto.image_url,
            amenity: dto.amenity,
        }
    }
}

/// Copy every client-editable field of `dto` onto `villa`.
///
/// `id` and the timestamps are left untouched.
pub fn apply_update(villa: &mut Villa, dto: VillaUpdateDto) {
    villa.name = dto.name;
    villa.details = dto.details;
    villa.rate = dto.rate;
    villa.occupancy = dto.occupancy;
    villa.sqft = dto.sqft;
    villa.image_url = dto.image_url;
    villa.amenity = dto.amenity;
}

/// Map a list of rows to DTOs, preserving order.
pub fn to_dtos(villas: Vec<Villa>) -> Vec<VillaDto> {
    villas.into_iter().map(VillaDto::from).collect()
}
