//! Expense API handlers
//!
//! Contains HTTP request handlers for expense CRUD operations. Payloads are
//! validated here, before they reach the service.

use super::AppState;
use crate::dto::{CreateExpenseDto, ExpenseDto, UpdateExpenseDto};
use crate::error::AppError;
use crate::models::ExpenseId;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Json,
};
use std::sync::Arc;

/// GET /api/expenses - List all expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ExpenseDto>>, AppError> {
    Ok(Json(state.service.get_expenses().await?))
}

/// GET /api/expenses/:id - Get a specific expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ExpenseId>,
) -> Result<Json<ExpenseDto>, AppError> {
    Ok(Json(state.service.get_expense(id).await?))
}

/// POST /api/expenses - Create a new expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateExpenseDto>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ExpenseDto>), AppError> {
    request
        .validate(&state.validation.price_range)
        .map_err(AppError::Validation)?;

    let expense = state.service.create_expense(request).await?;
    let location = format!("/api/expenses/{}", expense.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(expense),
    ))
}

/// PUT /api/expenses/:id - Update an expense
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ExpenseId>,
    Json(request): Json<UpdateExpenseDto>,
) -> Result<StatusCode, AppError> {
    request
        .validate(&state.validation.price_range)
        .map_err(AppError::Validation)?;

    state.service.update_expense(id, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ExpenseId>,
) -> Result<StatusCode, AppError> {
    state.service.delete_expense(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
