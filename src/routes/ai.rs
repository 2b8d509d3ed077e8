// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! AI route generation. Combines the Gemini and Places clients into an
//! ephemeral route: nothing here is persisted.

use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::places_lookup::PlaceDetails;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai/generate-route", post(generate_route))
        .route("/ai/route-suggestions", get(route_suggestions))
}

/// Fallback walking time per leg when no travel data is available.
const FALLBACK_LEG_MINUTES: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct GenerateRouteRequest {
    pub prompt: String,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiPlace {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub ai_summary: String,
    pub rating: f64,
    pub review_count: u32,
    pub price_level: u8,
    /// Minutes to walk to the next stop (0 for the final stop)
    pub walking_time: u32,
    pub driving_time: u32,
    pub coordinates: Coordinates,
    pub image_url: String,
    pub tags: Vec<String>,
    pub vibe: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedRouteResponse {
    pub name: String,
    pub narrative: String,
    pub places: Vec<AiPlace>,
    pub total_walking_time: u32,
    pub total_driving_time: u32,
}

/// Generate an ephemeral route from a free-form prompt.
///
/// Flow: Gemini proposes stops, each stop is verified against the Places
/// API (unresolvable stops are skipped), the narrative is refined with
/// the verified details. Stops with no real rating or review data are
/// dropped from the result.
async fn generate_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRouteRequest>,
) -> Result<Json<GeneratedRouteResponse>> {
    let prompt_len = payload.prompt.chars().count();
    if !(10..=500).contains(&prompt_len) {
        return Err(AppError::BadRequest(
            "prompt must be between 10 and 500 characters".to_string(),
        ));
    }

    let city = payload.city.as_deref().unwrap_or("any city");
    let initial = state.gemini.generate_route(&payload.prompt, city).await?;

    // Verify each proposed stop against the Places API. A stop that
    // fails lookup is skipped rather than failing the whole route.
    let search_city = payload.city.as_deref();
    let mut enriched: Vec<(String, PlaceDetails)> = Vec::new();
    for stop in &initial.stops {
        match state.places_lookup.find_place(stop, search_city).await {
            Ok(Some(details)) => enriched.push((stop.clone(), details)),
            Ok(None) => {
                tracing::warn!(stop = %stop, "No place details found, skipping stop");
            }
            Err(e) => {
                tracing::warn!(stop = %stop, error = %e, "Place lookup failed, skipping stop");
            }
        }
    }

    if enriched.is_empty() {
        return Err(AppError::Upstream(
            "Could not verify any of the suggested places".to_string(),
        ));
    }

    tracing::info!(
        resolved = enriched.len(),
        proposed = initial.stops.len(),
        "Enriched route stops"
    );

    let details: Vec<PlaceDetails> = enriched.iter().map(|(_, d)| d.clone()).collect();
    let (narrative, name) = match state.gemini.refine_narrative(&initial, &details).await {
        Ok(refinement) => {
            let name = refinement.refined_name.unwrap_or_else(|| initial.name.clone());
            (refinement.narrative, name)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Narrative refinement failed, using fallback");
            let fallback = format!(
                "Embark on an exciting journey through {}, where each stop offers \
                 unique experiences and discoveries. This carefully curated route \
                 takes you through the best that {} has to offer, combining local \
                 favorites with hidden gems.",
                initial.name, city
            );
            (fallback, initial.name.clone())
        }
    };

    let mut places = Vec::new();
    let mut total_walking_time = 0;
    let last = enriched.len() - 1;
    for (i, (stop, place)) in enriched.into_iter().enumerate() {
        // Walking time to the next stop; travel data is unavailable here
        // so every leg gets the fallback estimate.
        let walking_time = if i < last { FALLBACK_LEG_MINUTES } else { 0 };
        total_walking_time += walking_time;

        // Only keep stops backed by real review data.
        if place.review_count == 0 || place.rating == 0.0 {
            tracing::warn!(place = %place.name, "Skipping stop with no review data");
            continue;
        }

        let tags = if place.types.is_empty() {
            vec!["interesting".to_string()]
        } else {
            place.types.iter().take(3).cloned().collect()
        };
        let vibe = if place.rating > 4.0 {
            vec!["popular".to_string()]
        } else {
            vec!["interesting".to_string()]
        };

        places.push(AiPlace {
            id: format!("ai_place_{i}"),
            name: place.name,
            category: place.category,
            description: place.address,
            ai_summary: initial.descriptions.get(&stop).cloned().unwrap_or_default(),
            rating: place.rating,
            review_count: place.review_count,
            price_level: place.price_level,
            walking_time,
            driving_time: walking_time / 2,
            coordinates: place.coordinates,
            image_url: place
                .photo_url
                .unwrap_or_else(|| "/placeholder.svg".to_string()),
            tags,
            vibe,
        });
    }

    if places.is_empty() {
        return Err(AppError::Upstream(
            "None of the suggested places have real review data".to_string(),
        ));
    }

    tracing::info!(name = %name, places = places.len(), "Generated route");

    Ok(Json(GeneratedRouteResponse {
        name,
        narrative,
        places,
        total_walking_time,
        total_driving_time: total_walking_time / 2,
    }))
}

#[derive(Debug, Serialize)]
pub struct RouteSuggestion {
    pub prompt: &'static str,
    pub theme: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteSuggestionsResponse {
    pub suggestions: Vec<RouteSuggestion>,
}

/// Canned prompt suggestions for the route generator.
async fn route_suggestions() -> Json<RouteSuggestionsResponse> {
    let suggestions = vec![
        RouteSuggestion {
            prompt: "Show me the best coffee shops and cafes in the city",
            theme: "Coffee Culture",
            duration: "2-3 hours",
            description: "Discover the local coffee scene",
        },
        RouteSuggestion {
            prompt: "I want to explore parks and outdoor spaces",
            theme: "Nature & Parks",
            duration: "3-4 hours",
            description: "Connect with nature in beautiful outdoor spaces",
        },
        RouteSuggestion {
            prompt: "Find me some hidden gems and local favorites",
            theme: "Hidden Gems",
            duration: "2-3 hours",
            description: "Discover places only locals know about",
        },
        RouteSuggestion {
            prompt: "I'm interested in art and culture, what should I visit?",
            theme: "Arts & Culture",
            duration: "3-4 hours",
            description: "Explore the artistic and cultural side of the city",
        },
        RouteSuggestion {
            prompt: "Show me the best food scene with restaurants and cafes",
            theme: "Food Scene",
            duration: "4-5 hours",
            description: "Taste your way through the local culinary delights",
        },
    ];

    Json(RouteSuggestionsResponse { suggestions })
}
