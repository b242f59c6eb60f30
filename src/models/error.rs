//! Error types shared by the store and the engine.

use uuid::Uuid;

/// Failures reported by the persistence layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StorageError {
    /// A unique index rejected the write (e.g. a second team for the same player pair).
    UniqueViolation { index: &'static str },
    /// A row referenced by the write does not exist.
    MissingRow { table: &'static str, id: Uuid },
    /// The row is still referenced by another table and cannot be deleted yet.
    ForeignKeyViolation { table: &'static str, id: Uuid },
    /// The backend refused a write to the table.
    WriteFailed { table: &'static str },
    /// The store lock was poisoned by a panic in another transaction.
    Poisoned,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::UniqueViolation { index } => {
                write!(f, "Unique constraint violated: {}", index)
            }
            StorageError::MissingRow { table, id } => {
                write!(f, "Referenced {} row {} does not exist", table, id)
            }
            StorageError::ForeignKeyViolation { table, id } => {
                write!(f, "{} row {} is still referenced", table, id)
            }
            StorageError::WriteFailed { table } => write!(f, "Write to {} failed", table),
            StorageError::Poisoned => write!(f, "Store lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Errors surfaced by engine operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Malformed or missing input (e.g. tournament has no players).
    Validation(String),
    /// Referenced entity does not exist. Nothing was mutated.
    NotFound { entity: &'static str, id: Uuid },
    /// The store failed; the enclosing transaction was rolled back.
    Storage(StorageError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(msg) => write!(f, "{}", msg),
            EngineError::NotFound { entity, id } => write!(f, "No {} with id {}", entity, id),
            EngineError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for EngineError {
    fn from(e: StorageError) -> Self {
        EngineError::Storage(e)
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
