// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route creation, listing, and deletion.

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
use crate::models::{Place, Route};
use crate::routes::load_user;
use crate::services::narrative::route_narrative;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/{id}", get(get_route).delete(delete_route))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 2, message = "route must include at least 2 places"))]
    pub place_ids: Vec<u32>,
}

/// Route fields plus the resolved place records.
#[derive(Serialize)]
pub struct RouteDetail {
    #[serde(flatten)]
    pub route: Route,
    pub places: Vec<Place>,
}

#[derive(Serialize)]
pub struct RouteResponse {
    pub route: RouteDetail,
}

#[derive(Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteDetail>,
}

/// Create a route from an ordered list of place IDs.
///
/// Aborts without side effects if any place is missing. After the route
/// is stored, the owner's Street Cred is recomputed from scratch rather
/// than incremented by 25, so it cannot drift from the visited-place
/// count.
async fn create_route(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = load_user(&state, &auth).await?;

    // Resolve every stop before writing anything
    let mut places = Vec::with_capacity(payload.place_ids.len());
    for place_id in &payload.place_ids {
        let place = state
            .db
            .get_place(*place_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Place not found: {}", place_id)))?;
        places.push(place);
    }

    let total_walking_time = places.iter().map(|p| p.walking_time).sum();
    let total_driving_time = places.iter().map(|p| p.driving_time).sum();
    let narrative = route_narrative(&places);

    let route = Route {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        name: payload.name,
        place_ids: payload.place_ids,
        total_walking_time,
        total_driving_time,
        narrative,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.db.insert_route(&route).await?;

    // Recompute-from-scratch: count includes the route just inserted
    let routes_created = state.db.count_routes_for_user(&user.id).await?;
    let now = chrono::Utc::now().to_rfc3339();
    state
        .db
        .recompute_street_cred_atomic(&user.id, routes_created, &now)
        .await?;

    tracing::info!(
        route_id = %route.id,
        user_id = %user.id,
        stops = route.place_ids.len(),
        "Route created"
    );

    Ok((
        StatusCode::CREATED,
        Json(RouteResponse {
            route: RouteDetail { route, places },
        }),
    ))
}

/// List the current user's routes, newest first, with places populated.
async fn list_routes(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<RoutesResponse>> {
    let routes = state.db.list_routes_for_user(&auth.user_id).await?;

    let mut detailed = Vec::with_capacity(routes.len());
    for route in routes {
        let places = resolve_places(&state, &route).await?;
        detailed.push(RouteDetail { route, places });
    }

    Ok(Json(RoutesResponse { routes: detailed }))
}

/// Get a single route with full place details.
async fn get_route(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteResponse>> {
    let route = fetch_owned_route(&state, &auth, &route_id).await?;
    let places = resolve_places(&state, &route).await?;

    Ok(Json(RouteResponse {
        route: RouteDetail { route, places },
    }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete a route owned by the current user.
async fn delete_route(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(route_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let route = fetch_owned_route(&state, &auth, &route_id).await?;
    state.db.delete_route(&route.id).await?;

    tracing::info!(route_id = %route.id, user_id = %auth.user_id, "Route deleted");

    Ok(Json(DeleteResponse {
        message: "Route deleted successfully".to_string(),
    }))
}

/// Fetch a route the current user owns. Ownership mismatch is reported
/// exactly like a missing credential.
async fn fetch_owned_route(
    state: &AppState,
    auth: &AuthUser,
    route_id: &str,
) -> Result<Route> {
    let route = state
        .db
        .get_route(route_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

    if route.user_id != auth.user_id {
        return Err(AppError::Unauthorized);
    }

    Ok(route)
}

/// Resolve a route's place IDs, skipping any that have been reseeded away.
async fn resolve_places(state: &AppState, route: &Route) -> Result<Vec<Place>> {
    let mut places = Vec::with_capacity(route.place_ids.len());
    for place_id in &route.place_ids {
        if let Some(place) = state.db.get_place(*place_id).await? {
            places.push(place);
        }
    }
    Ok(places)
}
