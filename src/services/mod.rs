// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod gamification;
pub mod gemini;
pub mod narrative;
pub mod places_lookup;
pub mod recommend;

pub use gemini::{GeminiClient, RetryPolicy};
pub use places_lookup::PlacesClient;
