// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation engine: filter, score, rank.
//!
//! Operates on the in-memory place catalog. Places failing the time or
//! price hard filter are never scored, regardless of how well their
//! tags or vibe match.

use crate::models::Place;

/// Maximum number of recommendations returned.
const MAX_RESULTS: usize = 6;

/// A transient recommendation query.
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    /// Current mood, e.g. "relaxed" (may be empty)
    pub mood: String,
    /// Available time in minutes
    pub time_available: u32,
    /// Maximum acceptable price level (0-3)
    pub max_price_level: u8,
    /// Interest terms matched against tags and category
    pub interests: Vec<String>,
}

/// Recommend up to 6 places from the catalog for the given query.
///
/// The score is an internal sort key only: ties keep catalog order
/// (stable sort) and the score is never attached to returned places.
pub fn recommend(catalog: &[Place], query: &RecommendationQuery) -> Vec<Place> {
    let mood = query.mood.to_lowercase();
    let interests: Vec<String> = query.interests.iter().map(|i| i.to_lowercase()).collect();

    let mut scored: Vec<(&Place, u32)> = catalog
        .iter()
        .filter(|p| {
            p.walking_time <= query.time_available && p.price_level <= query.max_price_level
        })
        .map(|p| (p, score_place(p, &mood, &interests)))
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(p, _)| p.clone())
        .collect()
}

/// Additive integer score for a single place.
fn score_place(place: &Place, mood: &str, interests: &[String]) -> u32 {
    let mut score = 0;

    if !mood.is_empty() {
        let vibes: Vec<String> = place.vibe.iter().map(|v| v.to_lowercase()).collect();
        if vibes.iter().any(|v| v == mood) {
            // Exact mood match
            score += 2;
        } else {
            let synonyms = mood_synonyms(mood);
            score += vibes.iter().filter(|v| synonyms.contains(&v.as_str())).count() as u32;
        }
    }

    if !interests.is_empty() {
        let tags: Vec<String> = place.tags.iter().map(|t| t.to_lowercase()).collect();
        let category = place.category.to_lowercase();

        for interest in interests {
            if tags.iter().any(|t| t == interest) {
                score += 1;
            }
            // Both can fire for the same interest
            if category.contains(interest.as_str()) {
                score += 1;
            }
        }
    }

    if place.rating >= 4.8 {
        score += 2;
    } else if place.rating >= 4.5 {
        score += 1;
    }

    score
}

/// Related mood words for the synonym bonus. Moods absent from the table
/// yield only the exact-vibe-match bonus.
fn mood_synonyms(mood: &str) -> &'static [&'static str] {
    match mood {
        "relaxed" => &["peaceful", "serene", "calm", "quiet", "tranquil", "cozy"],
        "adventurous" => &["exciting", "bold", "daring", "playful", "energetic"],
        "curious" => &[
            "discovery",
            "exploring",
            "intellectual",
            "thought-provoking",
        ],
        "energetic" => &["lively", "vibrant", "dynamic", "bustling", "playful"],
        "creative" => &["inspiring", "artistic", "innovative", "modern"],
        "romantic" => &["intimate", "elegant", "beautiful", "warm"],
        "social" => &["community", "friendly", "lively", "bustling"],
        "peaceful" => &["serene", "quiet", "calm", "tranquil", "relaxed"],
        "inspired" => &["inspiring", "creative", "thought-provoking", "modern"],
        "nostalgic" => &["vintage", "timeless", "reflective", "classic"],
        _ => &[],
    }
}
