//! Expense event observers
//!
//! The service reports what happened to an [`ExpenseObserver`] after each
//! step. Observers are a side channel: they return nothing and cannot change
//! the outcome of a request.

use crate::models::{Expense, ExpenseId};
use std::fmt;
use tracing::{debug, info};

/// Service operation an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch a single expense
    Get,
    /// Replace category and price
    Update,
    /// Remove an expense
    Delete,
}

impl Operation {
    /// Lowercase name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives notifications about expense operations
///
/// Every method defaults to doing nothing.
pub trait ExpenseObserver: Send + Sync {
    /// A single expense was read
    fn retrieved(&self, _expense: &Expense) {}

    /// All expenses were listed
    fn listed(&self, _count: usize) {}

    /// A new expense was stored
    fn created(&self, _expense: &Expense) {}

    /// An expense was replaced with new values
    fn updated(&self, _before: &Expense, _after: &Expense) {}

    /// An expense was removed
    fn deleted(&self, _expense: &Expense) {}

    /// A lookup found nothing for `id`
    fn not_found(&self, _operation: Operation, _id: ExpenseId) {}
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExpenseObserver for NoopObserver {}

/// Observer that writes events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExpenseObserver for TracingObserver {
    fn retrieved(&self, expense: &Expense) {
        info!(
            expense_id = %expense.id,
            category = %expense.category,
            price = %expense.price,
            "Retrieved expense"
        );
    }

    fn listed(&self, count: usize) {
        debug!(count, "Listed expenses");
    }

    fn created(&self, expense: &Expense) {
        info!(
            expense_id = %expense.id,
            category = %expense.category,
            price = %expense.price,
            "Created expense"
        );
    }

    fn updated(&self, before: &Expense, after: &Expense) {
        info!(
            expense_id = %after.id,
            category_before = %before.category,
            category_after = %after.category,
            price_before = %before.price,
            price_after = %after.price,
            "Updated expense"
        );
    }

    fn deleted(&self, expense: &Expense) {
        info!(expense_id = %expense.id, "Deleted expense");
    }

    fn not_found(&self, operation: Operation, id: ExpenseId) {
        debug!(operation = %operation, expense_id = %id, "Expense not found");
    }
}
