use crate::types::DbId;
use crate::validation::ModelErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field-level validation failures, keyed by field name.
    #[error("Validation failed: {0}")]
    Model(ModelErrors),
}

impl From<ModelErrors> for CoreError {
    fn from(errors: ModelErrors) -> Self {
        CoreError::Model(errors)
    }
}
