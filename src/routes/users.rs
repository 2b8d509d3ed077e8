// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile, preferences, and visit-place routes.

use axum::{
    extract::State,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{UserPreferences, UserPublic};
use crate::routes::load_user;
use crate::services::gamification::{self, LevelProgress};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route("/users/preferences", put(update_preferences))
        .route("/users/visit-place", post(visit_place))
}

// ─── Profile ─────────────────────────────────────────────────

/// Activity counters shown on the profile.
#[derive(Serialize)]
pub struct ProfileStats {
    pub visited_places: usize,
    pub routes_created: u32,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserPublic,
    pub stats: ProfileStats,
    pub progress: LevelProgress,
}

/// Get the current user's profile with stats and level progress.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let user = load_user(&state, &auth).await?;
    let routes_created = state.db.count_routes_for_user(&user.id).await?;

    Ok(Json(ProfileResponse {
        stats: ProfileStats {
            visited_places: user.visited_places.len(),
            routes_created,
        },
        progress: gamification::level_progress(user.street_cred),
        user: user.into(),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: UserPublic,
}

/// Update the display name (email is immutable).
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut user = load_user(&state, &auth).await?;
    user.name = payload.name;
    user.updated_at = chrono::Utc::now().to_rfc3339();
    state.db.upsert_user(&user).await?;

    Ok(Json(UserResponse { user: user.into() }))
}

// ─── Preferences ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct PreferencesResponse {
    pub preferences: UserPreferences,
}

/// Replace the preference bundle used for recommendations.
async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UserPreferences>,
) -> Result<Json<PreferencesResponse>> {
    let mut user = load_user(&state, &auth).await?;
    user.preferences = payload;
    user.updated_at = chrono::Utc::now().to_rfc3339();
    state.db.upsert_user(&user).await?;

    Ok(Json(PreferencesResponse {
        preferences: user.preferences,
    }))
}

// ─── Visit Place ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VisitPlaceRequest {
    pub place_id: u32,
}

#[derive(Serialize)]
pub struct VisitPlaceResponse {
    pub street_cred: u32,
    pub level: u32,
    pub visited_places: Vec<String>,
}

/// Mark a place as visited and award Street Cred.
///
/// Visiting the same place twice is a no-op for both the visited list
/// and the point total.
async fn visit_place(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<VisitPlaceRequest>,
) -> Result<Json<VisitPlaceResponse>> {
    // Place must exist before any user mutation
    state
        .db
        .get_place(payload.place_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Place {} not found", payload.place_id)))?;

    let now = chrono::Utc::now().to_rfc3339();
    let user = state
        .db
        .visit_place_atomic(&auth.user_id, &payload.place_id.to_string(), &now)
        .await?;

    Ok(Json(VisitPlaceResponse {
        street_cred: user.street_cred,
        level: gamification::level(user.street_cred),
        visited_places: user.visited_places,
    }))
}
