//! Expense entity
//!
//! The canonical stored record for one expense. The stores own persisted
//! entity state; everything else works on owned copies.

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an expense
pub type ExpenseId = Uuid;

/// A single expense record
///
/// `id` and `date_of_expense` are fixed at creation. Updates produce a new
/// value through [`Expense::with_changes`] instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier, assigned at creation
    pub id: ExpenseId,
    /// Free-text label (e.g. "Food", "Travel")
    pub category: String,
    /// Amount spent
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// When the expense was recorded, with its timezone offset
    pub date_of_expense: DateTime<FixedOffset>,
}

impl Expense {
    /// Create a new expense with a fresh identifier and the current timestamp
    pub fn new(category: String, price: Decimal) -> Self {
        Self {
            id: Self::generate_id(),
            category,
            price,
            date_of_expense: Utc::now().fixed_offset(),
        }
    }

    /// Generate a new unique ID for an expense
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> ExpenseId {
        Uuid::new_v4()
    }

    /// Copy of this expense with category and price replaced
    ///
    /// Identifier and creation timestamp are carried over unchanged.
    pub fn with_changes(&self, category: String, price: Decimal) -> Self {
        Self {
            id: self.id,
            category,
            price,
            date_of_expense: self.date_of_expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_new() {
        let before = Utc::now();
        let expense = Expense::new("Food".to_string(), Decimal::from(42));
        let after = Utc::now();

        assert_eq!(expense.category, "Food");
        assert_eq!(expense.price, Decimal::from(42));
        assert!(expense.date_of_expense >= before);
        assert!(expense.date_of_expense <= after);
    }

    #[test]
    fn test_expense_generate_id() {
        let id1 = Expense::generate_id();
        let id2 = Expense::generate_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_with_changes_keeps_identity() {
        let original = Expense::new("Food".to_string(), Decimal::from(42));
        let updated = original.with_changes("Travel".to_string(), Decimal::from(99));

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date_of_expense, original.date_of_expense);
        assert_eq!(updated.category, "Travel");
        assert_eq!(updated.price, Decimal::from(99));
        // Original value is untouched
        assert_eq!(original.category, "Food");
    }

    #[test]
    fn test_expense_document_shape() {
        let expense = Expense::new("Food".to_string(), Decimal::new(1250, 2));
        let json = serde_json::to_value(&expense).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("dateOfExpense"));
        assert_eq!(object["category"], "Food");
        assert_eq!(object["price"].as_f64(), Some(12.5));

        let decoded: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, expense);
    }
}
