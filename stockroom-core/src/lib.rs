pub mod repository;
pub mod validation;

use uuid::Uuid;

pub use repository::{
    InventoryItemRepository, RepoError, RepoResult, StockLedgerRepository, StockUnitOfWork,
};
pub use validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Insufficient stock. Available: {available}")]
    InsufficientStock { requested: i32, available: i32 },
    #[error("Persistence failure: {0}")]
    PersistenceError(String),
}

impl CoreError {
    pub fn item_not_found(id: Uuid) -> Self {
        CoreError::NotFound { entity: "Item", id }
    }

    pub fn persistence(err: RepoError) -> Self {
        CoreError::PersistenceError(err.to_string())
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::ValidationError(errors)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
