//! In-memory expense store
//!
//! Keeps expenses in a vector behind an async lock. Used as the deterministic
//! fake in tests and for running the service without a database.

use super::{ExpenseStore, StoreError};
use crate::models::{Expense, ExpenseId};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Expense store backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryExpenseStore {
    expenses: RwLock<Vec<Expense>>,
}

impl InMemoryExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given expenses
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: RwLock::new(expenses),
        }
    }
}

#[async_trait]
impl ExpenseStore for InMemoryExpenseStore {
    async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, StoreError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self.expenses.read().await.clone())
    }

    async fn create(&self, expense: &Expense) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(StoreError::DuplicateId(expense.id));
        }
        expenses.push(expense.clone());

        debug!("Created expense: {}", expense.id);
        Ok(())
    }

    async fn update(&self, expense: &Expense) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        if let Some(existing) = expenses.iter_mut().find(|e| e.id == expense.id) {
            *existing = expense.clone();
            debug!("Updated expense: {}", expense.id);
        }
        Ok(())
    }

    async fn delete(&self, id: ExpenseId) -> Result<(), StoreError> {
        let mut expenses = self.expenses.write().await;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);

        debug!(removed = before - expenses.len(), "Deleted expense: {}", id);
        Ok(())
    }
}
