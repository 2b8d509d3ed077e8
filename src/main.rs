// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! City Companion API Server
//!
//! Serves the city-exploration companion API: place catalog and
//! recommendations, walking routes, street cred, expenses, and
//! AI-assisted route generation.

use city_companion::{
    config::Config,
    db::FirestoreDb,
    services::{GeminiClient, PlacesClient, RetryPolicy},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting City Companion API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize external AI and place-lookup clients
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        RetryPolicy::default(),
    );
    let places_lookup = PlacesClient::new(config.places_api_key.clone());
    tracing::info!(model = %config.gemini_model, "External service clients initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        gemini,
        places_lookup,
    });

    // Build router
    let app = city_companion::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("city_companion=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
