// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense log model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Accommodation,
    Other,
}

impl ExpenseCategory {
    /// Category name as stored and returned (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Other => "other",
        }
    }
}

/// An expense log entry stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Document ID (UUID v4)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Amount, strictly positive
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Expense date (ISO 8601)
    pub date: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

/// Aggregate statistics over a user's expenses.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub by_category: HashMap<String, f64>,
    pub category_percentages: HashMap<String, f64>,
}

impl ExpenseSummary {
    /// Compute summary statistics for a list of expenses.
    pub fn compute(expenses: &[Expense]) -> Self {
        let total: f64 = expenses.iter().map(|e| e.amount).sum();
        let count = expenses.len();
        let average = if count > 0 { total / count as f64 } else { 0.0 };

        let mut by_category: HashMap<String, f64> = HashMap::new();
        for expense in expenses {
            *by_category
                .entry(expense.category.as_str().to_string())
                .or_insert(0.0) += expense.amount;
        }

        let mut category_percentages = HashMap::new();
        if total > 0.0 {
            for (category, amount) in &by_category {
                category_percentages.insert(category.clone(), round2(amount / total * 100.0));
            }
        }

        Self {
            total: round2(total),
            count,
            average: round2(average),
            by_category,
            category_percentages,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
