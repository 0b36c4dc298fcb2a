//! Expense persistence
//!
//! [`ExpenseStore`] is the only persistence surface the rest of the crate
//! depends on. Absence is a normal return value (`Ok(None)`), never an error;
//! deciding whether absence means "not found" is left to the caller.

pub mod document;
pub mod memory;

pub use document::DocumentExpenseStore;
pub use memory::InMemoryExpenseStore;

use crate::config::{StorageConfig, StoreBackend};
use crate::models::{Expense, ExpenseId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// An expense with this identifier is already stored
    #[error("Expense already exists: {0}")]
    DuplicateId(ExpenseId),

    /// The underlying database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence operations for expenses
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Expense with the given identifier, or `None` if there is none
    async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError>;

    /// Every stored expense, in insertion order
    async fn list(&self) -> Result<Vec<Expense>, StoreError>;

    /// Persist a new expense
    ///
    /// Rejects an identifier that is already stored with
    /// [`StoreError::DuplicateId`].
    async fn create(&self, expense: &Expense) -> Result<(), StoreError>;

    /// Replace the stored expense that has `expense.id`
    ///
    /// Does nothing if no such expense exists. Callers that need a
    /// "not found" signal must check with [`ExpenseStore::get`] first.
    async fn update(&self, expense: &Expense) -> Result<(), StoreError>;

    /// Remove the expense with the given identifier, if present
    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError>;
}

/// Open the backend selected by the storage configuration
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn ExpenseStore>, StoreError> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryExpenseStore::new())),
        StoreBackend::Document => {
            let store = DocumentExpenseStore::open(&config.database_url()).await?;
            Ok(Arc::new(store))
        }
    }
}
