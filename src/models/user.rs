// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Walking pace preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Relaxed,
    Moderate,
    Fast,
}

/// Spending preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Budget,
    Moderate,
    Luxury,
}

/// Preference bundle used for personalized recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub mood: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub pace: Option<Pace>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub atmosphere: Vec<String>,
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document ID (UUID v4, minted at signup)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (unique, immutable)
    pub email: String,
    /// Argon2 password hash
    pub password_hash: String,
    /// Street Cred total; equals 10 * visited + 25 * routes created
    #[serde(default)]
    pub street_cred: u32,
    /// IDs of visited places (set semantics, no duplicates)
    #[serde(default)]
    pub visited_places: Vec<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    /// Signup timestamp (ISO 8601)
    pub created_at: String,
    /// Last profile/preferences/visit update (ISO 8601)
    pub updated_at: String,
}

/// User fields safe to return to clients (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: String,
    pub name: String,
    pub email: String,
    pub street_cred: u32,
    pub visited_places: Vec<String>,
    pub preferences: UserPreferences,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            street_cred: user.street_cred,
            visited_places: user.visited_places,
            preferences: user.preferences,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
