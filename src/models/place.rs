// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place catalog model.

use serde::{Deserialize, Serialize};

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A point of interest stored in Firestore.
///
/// Places are seeded administratively; there are no mutation endpoints.
/// The document ID is the decimal string of `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Catalog ID assigned at seeding time
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Short AI-written summary used in route narratives
    pub ai_summary: String,
    /// Rating on a 0-5 scale
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    /// Price level 0-3
    #[serde(default)]
    pub price_level: u8,
    /// Walking time in minutes from the city reference point
    #[serde(default)]
    pub walking_time: u32,
    /// Driving time in minutes from the city reference point
    #[serde(default)]
    pub driving_time: u32,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub image_url: String,
    /// Free-text tags for interest matching
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-text mood words for vibe matching
    #[serde(default)]
    pub vibe: Vec<String>,
    /// Seed timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: String,
}
