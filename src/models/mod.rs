// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod expense;
pub mod place;
pub mod route;
pub mod user;

pub use expense::{Expense, ExpenseCategory, ExpenseSummary};
pub use place::{Coordinates, Place};
pub use route::Route;
pub use user::{Budget, Pace, User, UserPreferences, UserPublic};
