// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense log routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Expense, ExpenseCategory, ExpenseSummary};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", axum::routing::delete(delete_expense))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    /// Unknown categories are rejected during deserialization
    pub category: ExpenseCategory,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the current time
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
}

/// Log a new expense.
async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if payload.amount <= 0.0 || !payload.amount.is_finite() {
        return Err(AppError::BadRequest(
            "amount must be greater than 0".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let expense = Expense {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: auth.user_id.clone(),
        amount: payload.amount,
        category: payload.category,
        description: payload.description,
        place_id: payload.place_id,
        place_name: payload.place_name,
        notes: payload.notes,
        date: payload.date.unwrap_or_else(|| now.clone()),
        created_at: now,
    };

    state.db.insert_expense(&expense).await?;

    tracing::info!(expense_id = %expense.id, user_id = %auth.user_id, "Expense logged");

    Ok((StatusCode::CREATED, Json(ExpenseResponse { expense })))
}

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub summary: ExpenseSummary,
}

/// List the current user's expenses with summary statistics.
async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ExpenseListResponse>> {
    let expenses = state.db.list_expenses_for_user(&auth.user_id).await?;
    let summary = ExpenseSummary::compute(&expenses);

    Ok(Json(ExpenseListResponse { expenses, summary }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete an expense owned by the current user. Ownership mismatch is
/// reported exactly like a missing credential.
async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(expense_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let expense = state
        .db
        .get_expense(&expense_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))?;

    if expense.user_id != auth.user_id {
        return Err(AppError::Unauthorized);
    }

    state.db.delete_expense(&expense.id).await?;

    Ok(Json(DeleteResponse {
        message: "Expense deleted successfully".to_string(),
    }))
}
