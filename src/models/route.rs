// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User-created route model.

use serde::{Deserialize, Serialize};

/// A user-curated itinerary over catalog places.
///
/// Routes are created atomically from a list of place IDs and never
/// mutated afterwards (delete-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Document ID (UUID v4)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    pub name: String,
    /// Ordered place IDs, at least 2
    pub place_ids: Vec<u32>,
    /// Sum of walking times over the stops, in minutes
    pub total_walking_time: u32,
    /// Sum of driving times over the stops, in minutes
    pub total_driving_time: u32,
    /// Generated narrative text
    pub narrative: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}
