// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Places API client for verified place details.
//!
//! Two-step lookup: text search to resolve a name to a place ID, then a
//! details call for ratings, coordinates, and reviews. Not-found is a
//! normal `Ok(None)`; transport and API errors are upstream failures.

use crate::error::AppError;
use crate::models::Coordinates;
use serde::Deserialize;
use std::time::Duration;

/// Maximum reviews carried per place.
const MAX_REVIEWS: usize = 3;

/// Google Places API client.
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Verified details for a looked-up place.
#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub name: String,
    pub address: String,
    pub coordinates: Coordinates,
    pub rating: f64,
    pub review_count: u32,
    pub price_level: u8,
    pub category: String,
    /// Raw place types from the API (used as tags downstream)
    pub types: Vec<String>,
    pub photo_url: Option<String>,
    pub reviews: Vec<PlaceReview>,
    pub editorial_summary: String,
}

/// A single user review.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
            api_key,
        }
    }

    /// Find a place by name, optionally scoped to a city.
    ///
    /// Returns `Ok(None)` when the search yields nothing.
    pub async fn find_place(
        &self,
        name: &str,
        city: Option<&str>,
    ) -> Result<Option<PlaceDetails>, AppError> {
        let query = match city {
            Some(city) => format!("{} {}", name, city),
            None => name.to_string(),
        };

        let url = format!("{}/textsearch/json", self.base_url);
        let search: TextSearchResponse = self
            .get_json(&url, &[("query", query.as_str()), ("type", "establishment")])
            .await?;

        let Some(first) = search.results.into_iter().next() else {
            tracing::warn!(place = name, "No places found");
            return Ok(None);
        };

        self.place_details(&first.place_id).await
    }

    /// Fetch detailed information for a Google place ID.
    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, AppError> {
        let url = format!("{}/details/json", self.base_url);
        let fields = "name,formatted_address,geometry,rating,user_ratings_total,\
                      price_level,types,photos,reviews,editorial_summary";
        let details: DetailsResponse = self
            .get_json(&url, &[("place_id", place_id), ("fields", fields)])
            .await?;

        let Some(result) = details.result else {
            return Ok(None);
        };

        let photo_url = result.photos.first().map(|p| {
            format!(
                "{}/photo?maxwidth=400&photoreference={}&key={}",
                self.base_url, p.photo_reference, self.api_key
            )
        });

        let mut reviews = result.reviews;
        reviews.truncate(MAX_REVIEWS);

        Ok(Some(PlaceDetails {
            name: result.name,
            address: result.formatted_address,
            coordinates: result
                .geometry
                .map(|g| g.location)
                .unwrap_or(Coordinates { lat: 0.0, lng: 0.0 }),
            rating: result.rating,
            review_count: result.user_ratings_total,
            price_level: result.price_level,
            category: categorize(&result.types),
            types: result.types,
            photo_url,
            reviews,
            editorial_summary: result.editorial_summary.map(|s| s.overview).unwrap_or_default(),
        }))
    }

    /// GET with query parameters and the API key, parsing the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Places API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }
}

/// Map Google place types to a display category.
fn categorize(types: &[String]) -> String {
    for t in types {
        let category = match t.as_str() {
            "cafe" => "Café",
            "restaurant" | "food" => "Restaurant",
            "bar" => "Bar",
            "bakery" => "Bakery",
            "park" => "Park",
            "museum" => "Museum",
            "art_gallery" => "Art Gallery",
            "book_store" => "Bookstore",
            "tourist_attraction" => "Attraction",
            "shopping_mall" | "store" => "Shopping",
            _ => continue,
        };
        return category.to_string();
    }
    "Place".to_string()
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    geometry: Option<Geometry>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    user_ratings_total: u32,
    #[serde(default)]
    price_level: u8,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde(default)]
    reviews: Vec<PlaceReview>,
    editorial_summary: Option<EditorialSummary>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct EditorialSummary {
    #[serde(default)]
    overview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_known_type() {
        assert_eq!(categorize(&["cafe".to_string()]), "Café");
        assert_eq!(
            categorize(&["point_of_interest".to_string(), "museum".to_string()]),
            "Museum"
        );
    }

    #[test]
    fn test_categorize_unknown_type() {
        assert_eq!(categorize(&["laundromat".to_string()]), "Place");
        assert_eq!(categorize(&[]), "Place");
    }

    #[test]
    fn test_details_response_parsing() {
        let body = r#"{
            "result": {
                "name": "Rose Garden",
                "formatted_address": "1 Garden Way",
                "geometry": {"location": {"lat": 37.88, "lng": -122.27}},
                "rating": 4.7,
                "user_ratings_total": 1200,
                "price_level": 0,
                "types": ["park", "point_of_interest"],
                "photos": [{"photo_reference": "ref123"}],
                "reviews": [
                    {"author_name": "A", "rating": 5, "text": "Lovely"},
                    {"author_name": "B", "rating": 4, "text": "Nice"},
                    {"author_name": "C", "rating": 5, "text": "Great"},
                    {"author_name": "D", "rating": 3, "text": "Fine"}
                ]
            }
        }"#;

        let parsed: DetailsResponse = serde_json::from_str(body).unwrap();
        let result = parsed.result.unwrap();
        assert_eq!(result.name, "Rose Garden");
        assert_eq!(result.user_ratings_total, 1200);
        assert_eq!(result.reviews.len(), 4);
    }
}
