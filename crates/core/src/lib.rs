//! Domain building blocks shared by the store and the HTTP layer.

pub mod error;
pub mod logging;
pub mod patch;
pub mod types;
pub mod validation;
pub mod villa;
