// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini API client for AI route generation and narrative refinement.
//!
//! Handles:
//! - Initial route generation from a natural-language prompt
//! - Narrative refinement over enriched place details
//! - Bounded exponential-backoff retry on rate limits and transient errors
//! - Schema validation of the model's JSON output

use crate::error::AppError;
use crate::services::places_lookup::PlaceDetails;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

/// Upper bound on stops in a generated route; longer lists are truncated.
const MAX_STOPS: usize = 8;
/// Minimum plausible narrative length from refinement.
const MIN_NARRATIVE_LEN: usize = 50;

/// Bounded retry policy for upstream calls.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each attempt
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

/// Route structure returned by the initial generation call.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRoute {
    pub name: String,
    pub stops: Vec<String>,
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

/// Refinement result over enriched places.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRefinement {
    pub narrative: String,
    #[serde(default)]
    pub refined_name: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client. One overall request timeout applies to
    /// each attempt; retries are governed by the injected policy.
    pub fn new(api_key: String, model: String, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key,
            model,
            retry,
        }
    }

    /// Generate an initial route (name, stops, per-stop descriptions) from
    /// a user prompt.
    pub async fn generate_route(
        &self,
        prompt: &str,
        city: &str,
    ) -> Result<GeneratedRoute, AppError> {
        let full_prompt = initial_route_prompt(prompt, city);
        let text = self.generate_with_retry(&full_prompt).await?;
        let mut route: GeneratedRoute = parse_model_json(&text)?;

        if route.stops.len() < 2 {
            return Err(AppError::Upstream(
                "Generated route has fewer than 2 stops".to_string(),
            ));
        }
        if route.stops.len() > MAX_STOPS {
            tracing::warn!(
                stops = route.stops.len(),
                "Generated route too long, truncating"
            );
            route.stops.truncate(MAX_STOPS);
        }

        tracing::info!(name = %route.name, stops = route.stops.len(), "Generated initial route");
        Ok(route)
    }

    /// Refine a route into a narrative using verified place details.
    pub async fn refine_narrative(
        &self,
        route: &GeneratedRoute,
        places: &[PlaceDetails],
    ) -> Result<RouteRefinement, AppError> {
        let prompt = refinement_prompt(route, places);
        let text = self.generate_with_retry(&prompt).await?;
        let refinement: RouteRefinement = parse_model_json(&text)?;

        if refinement.narrative.chars().count() < MIN_NARRATIVE_LEN {
            return Err(AppError::Upstream(
                "Refined narrative implausibly short".to_string(),
            ));
        }

        Ok(refinement)
    }

    /// Call the generateContent endpoint, retrying per the policy on
    /// rate limits, server errors, and transport failures.
    async fn generate_with_retry(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 2048,
                "responseMimeType": "application/json",
            },
        });

        let mut last_error = String::new();

        for attempt in 0..self.retry.max_attempts {
            if attempt > 0 {
                let delay = self.retry.base_delay * 2u32.pow(attempt - 1);
                tracing::warn!(attempt, delay_ms = delay.as_millis() as u64, "Retrying Gemini call");
                tokio::time::sleep(delay).await;
            }

            match self.http.post(&url).json(&body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: GenerateContentResponse = response
                            .json()
                            .await
                            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))?;
                        return parsed.text().ok_or_else(|| {
                            AppError::Upstream("Empty response from Gemini".to_string())
                        });
                    }

                    let body_text = response.text().await.unwrap_or_default();
                    last_error = format!("HTTP {}: {}", status, body_text);

                    // Retry only rate limits and server errors
                    if status.as_u16() != 429 && !status.is_server_error() {
                        return Err(AppError::Upstream(last_error));
                    }
                    tracing::warn!(status = status.as_u16(), "Transient Gemini error");
                }
                Err(e) => {
                    last_error = e.to_string();
                    tracing::warn!(error = %e, "Gemini request failed");
                }
            }
        }

        Err(AppError::Upstream(format!(
            "Gemini call failed after {} attempts: {}",
            self.retry.max_attempts, last_error
        )))
    }
}

/// generateContent response envelope (only the fields we read).
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
    }
}

/// Parse model output as JSON, tolerating markdown code fences and
/// surrounding prose.
fn parse_model_json<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T, AppError> {
    let candidate = extract_json(text);
    serde_json::from_str(candidate)
        .map_err(|e| AppError::Upstream(format!("Unparsable model output: {}", e)))
}

fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(start) = trimmed.find("```") {
        // Skip the opening fence and optional language tag
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }
    // Fall back to the outermost brace pair
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }
    trimmed
}

fn initial_route_prompt(user_prompt: &str, city: &str) -> String {
    format!(
        r#"You are an expert travel guide creating personalized walking tour itineraries.

User Request: "{user_prompt}"
Location: "{city}"

Create a walking tour with 3-5 interesting places. Your response MUST be ONLY valid JSON with this exact structure:
{{
  "name": "Creative route name",
  "stops": ["Place 1", "Place 2", "Place 3"],
  "descriptions": {{
    "Place 1": "Brief description",
    "Place 2": "Brief description",
    "Place 3": "Brief description"
  }}
}}

IMPORTANT:
- Return ONLY the JSON object, no other text
- Include descriptions for ALL stops
- Use real, well-known locations in {city}
- Make the route name creative and descriptive"#
    )
}

fn refinement_prompt(route: &GeneratedRoute, places: &[PlaceDetails]) -> String {
    let places_json: Vec<serde_json::Value> = places
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "description": p.editorial_summary,
                "rating": p.rating,
                "review_count": p.review_count,
                "address": p.address,
                "reviews": p.reviews.iter().take(2).map(|r| &r.text).collect::<Vec<_>>(),
            })
        })
        .collect();

    format!(
        r#"You are an expert travel guide. Based on the following verified place details, create a compelling narrative for this tour.

Route: "{}"

Places:
{}

Your response MUST be valid JSON with this structure:
{{
  "narrative": "2-3 paragraph engaging story connecting these places",
  "refined_name": "Improved route name (optional)"
}}

Make the narrative engaging and informative, incorporating the ratings and reviews.
The narrative should tell a story that connects these places thematically."#,
        route.name,
        serde_json::to_string_pretty(&places_json).unwrap_or_default()
    )
}
