// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Street Cred point and level math.
//!
//! Street Cred is defined as `10 * visited places + 25 * routes created`.
//! Route creation recomputes the total from scratch rather than
//! incrementing, so the stored value cannot drift from this definition.

use serde::Serialize;

/// Points awarded per visited place.
pub const POINTS_PER_VISIT: u32 = 10;
/// Points awarded per created route.
pub const POINTS_PER_ROUTE: u32 = 25;
/// Points per level bracket.
const POINTS_PER_LEVEL: u32 = 100;

/// Total Street Cred for the given activity counters.
pub fn street_cred(visited_count: u32, routes_completed: u32) -> u32 {
    POINTS_PER_VISIT * visited_count + POINTS_PER_ROUTE * routes_completed
}

/// Level for a Street Cred total. Levels start at 1 and increment
/// every 100 points.
pub fn level(street_cred: u32) -> u32 {
    street_cred / POINTS_PER_LEVEL + 1
}

/// Title for a level. Any level above the table falls into the last
/// bracket.
pub fn level_title(level: u32) -> &'static str {
    match level {
        0 | 1 => "Novice Explorer",
        2..=3 => "Local Wanderer",
        4..=6 => "City Connoisseur",
        7..=10 => "Urban Legend",
        11..=15 => "Master Navigator",
        16..=20 => "City Sage",
        _ => "Legendary Explorer",
    }
}

/// Detailed level progress for profile responses.
#[derive(Debug, Clone, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    pub title: &'static str,
    pub current_points: u32,
    pub points_to_next_level: u32,
    /// Percent of the current 100-point bracket, one decimal
    pub progress_percent: f64,
}

/// Compute level progress from a Street Cred total.
pub fn level_progress(street_cred: u32) -> LevelProgress {
    let level = level(street_cred);
    let points_in_level = street_cred - (level - 1) * POINTS_PER_LEVEL;

    LevelProgress {
        level,
        title: level_title(level),
        current_points: street_cred,
        points_to_next_level: level * POINTS_PER_LEVEL - street_cred,
        progress_percent: (points_in_level as f64 * 10.0).round() / 10.0,
    }
}
