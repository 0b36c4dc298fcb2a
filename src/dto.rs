//! Transfer objects
//!
//! Shapes exchanged with callers at the HTTP boundary, kept separate from the
//! stored [`Expense`] entity. Inbound objects are validated here before they
//! reach the service.

use crate::models::{Expense, ExpenseId};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense as returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    /// Unique identifier for the expense
    pub id: ExpenseId,
    /// Free-text label
    pub category: String,
    /// Amount spent
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// When the expense was recorded
    pub date_of_expense: DateTime<FixedOffset>,
}

impl From<&Expense> for ExpenseDto {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            category: expense.category.clone(),
            price: expense.price,
            date_of_expense: expense.date_of_expense,
        }
    }
}

/// Create expense request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseDto {
    /// Label for the new expense
    pub category: String,
    /// Amount spent
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl CreateExpenseDto {
    /// Validate the request against the configured price range
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self, range: &PriceRange) -> Result<(), String> {
        validate_fields(&self.category, self.price, range)
    }
}

/// Update expense request
///
/// Only category and price can change; identifier and date are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExpenseDto {
    /// New label
    pub category: String,
    /// New amount
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl UpdateExpenseDto {
    /// Validate the request against the configured price range
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self, range: &PriceRange) -> Result<(), String> {
        validate_fields(&self.category, self.price, range)
    }
}

/// Inclusive bounds on an expense price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    /// Lowest accepted price
    pub min: Decimal,
    /// Highest accepted price
    pub max: Decimal,
}

impl PriceRange {
    /// Build a range, rejecting inverted bounds
    pub fn new(min: Decimal, max: Decimal) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    /// Whether `price` lies within the range (both ends included)
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ONE,
            max: Decimal::ONE_THOUSAND,
        }
    }
}

fn validate_fields(category: &str, price: Decimal, range: &PriceRange) -> Result<(), String> {
    if category.trim().is_empty() {
        return Err("Category cannot be empty".to_string());
    }
    if !range.contains(price) {
        return Err(format!(
            "Price must be between {} and {}",
            range.min, range.max
        ));
    }
    Ok(())
}
