//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - An insert struct carrying the client-supplied columns
//! - `Deserialize` + `Validate` DTOs for the wire

pub mod villa;
