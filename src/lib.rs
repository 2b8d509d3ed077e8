// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! City Companion: a city-exploration companion backend
//!
//! This crate provides the backend API for browsing a curated place
//! catalog, building walking routes, tracking street cred, logging
//! expenses, and generating AI-assisted routes.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{GeminiClient, PlacesClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub gemini: GeminiClient,
    pub places_lookup: PlacesClient,
}
