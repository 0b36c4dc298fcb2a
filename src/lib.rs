//! Expenses API Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
/// Expense event observers (logging side channel)
pub mod observer;
pub mod service;
/// Expense persistence
///
/// The store trait and its in-memory and document-database backends.
pub mod store;
