// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Place catalog and recommendation routes.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Place;
use crate::services::recommend::{recommend, RecommendationQuery};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/places", get(list_places))
        .route("/places/{id}", get(get_place))
        .route("/places/recommendations", post(recommendations))
}

// ─── Catalog ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    /// Filter by category
    category: Option<String>,
    /// Filter by maximum price level (0-3)
    price_level: Option<u8>,
    /// Filter by tags (comma-separated, match any)
    tags: Option<String>,
}

#[derive(Serialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
}

/// List catalog places with optional filters.
async fn list_places(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<PlacesResponse>> {
    let mut places = state
        .db
        .list_places(query.category.as_deref(), query.price_level)
        .await?;

    if let Some(tags) = &query.tags {
        let wanted: Vec<String> = tags
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if !wanted.is_empty() {
            places.retain(|p| {
                p.tags
                    .iter()
                    .any(|tag| wanted.contains(&tag.to_lowercase()))
            });
        }
    }

    Ok(Json(PlacesResponse { places }))
}

#[derive(Serialize)]
pub struct PlaceResponse {
    pub place: Place,
}

/// Get a single place by catalog ID.
async fn get_place(
    State(state): State<Arc<AppState>>,
    Path(place_id): Path<u32>,
) -> Result<Json<PlaceResponse>> {
    let place = state
        .db
        .get_place(place_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Place {} not found", place_id)))?;

    Ok(Json(PlaceResponse { place }))
}

// ─── Recommendations ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub mood: String,
    #[serde(default = "default_time_available")]
    pub time_available: u32,
    #[serde(default = "default_price_level")]
    pub price_level: u8,
    #[serde(default)]
    pub interests: Vec<String>,
}

fn default_time_available() -> u32 {
    60
}
fn default_price_level() -> u8 {
    3
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Place>,
}

/// Personalized recommendations over the catalog.
async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecommendationRequest>,
) -> Result<Json<RecommendationsResponse>> {
    // The catalog is small; the hard filter and scoring run in memory
    let catalog = state.db.list_places(None, None).await?;

    let query = RecommendationQuery {
        mood: payload.mood,
        time_available: payload.time_available,
        max_price_level: payload.price_level,
        interests: payload.interests,
    };

    Ok(Json(RecommendationsResponse {
        recommendations: recommend(&catalog, &query),
    }))
}
