// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route narrative generation.
//!
//! Deterministic template prose over an ordered list of places. The AI
//! route endpoints use Gemini for richer text; this is the offline
//! generator used for user-created routes and as the refinement fallback.

use crate::models::Place;

/// Maximum summary length carried into a connecting sentence.
const MAX_SUMMARY_LEN: usize = 100;

/// Generate narrative prose for an ordered list of places.
pub fn route_narrative(places: &[Place]) -> String {
    match places {
        [] => "Your journey awaits!".to_string(),
        [only] => format!(
            "Visit {}, where {}.",
            only.name,
            summary_or(only, "adventure awaits")
        ),
        [first, middle @ .., last] => {
            let mut sentences = vec![format!(
                "Begin your journey at {}, where {}.",
                first.name,
                summary_or(first, "your adventure starts")
            )];

            for place in middle {
                sentences.push(format!(
                    "From there, let the path guide you to {}, {}.",
                    place.name,
                    truncate(&summary_or(place, "new experiences await"))
                ));
            }

            sentences.push(format!(
                "Finally, complete your adventure at {}, {}.",
                last.name,
                truncate(&summary_or(last, "your journey concludes"))
            ));

            sentences.join(" ")
        }
    }
}

fn summary_or<'a>(place: &'a Place, fallback: &'a str) -> String {
    if place.ai_summary.is_empty() {
        fallback.to_string()
    } else {
        place.ai_summary.clone()
    }
}

/// Shorten a summary to at most 100 characters, marking the cut with "...".
fn truncate(summary: &str) -> String {
    if summary.chars().count() > MAX_SUMMARY_LEN {
        let head: String = summary.chars().take(MAX_SUMMARY_LEN - 3).collect();
        format!("{}...", head)
    } else {
        summary.to_string()
    }
}
