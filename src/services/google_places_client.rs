// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Place details, autocomplete and distance matrix lookups against Google

use crate::config::env::{DEFAULT_DISTANCE_MATRIX_URL, DEFAULT_PLACES_BASE_URL};
use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{Distance, DistanceMatrix, Location, Place, Suggestion};
use crate::services::PlacesApi;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Fields requested from Place Details
const DETAIL_FIELDS: &str = "place_id,name,formatted_address,geometry,types,rating,user_ratings_total,formatted_phone_number,international_phone_number,website,url";

/// Google Places API client
/// DOCUMENTATION: Handles authentication, throttling and API calls to Google
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
    /// Distance Matrix endpoint
    distance_matrix_url: String,
    /// Throttles outbound requests
    limiter: DefaultDirectRateLimiter,
}

/// Individual place from Google Places API
/// DOCUMENTATION: Subset of the Place Details payload we map into `Place`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    pub place_id: String,
    /// Place name
    #[serde(default)]
    pub name: String,
    /// Formatted address
    pub formatted_address: Option<String>,
    /// Geographic location
    pub geometry: Option<GoogleGeometry>,
    /// Place types array (e.g., ["restaurant", "food", "point_of_interest"])
    #[serde(default)]
    pub types: Vec<String>,
    /// Rating (0-5)
    pub rating: Option<f32>,
    /// Number of user ratings
    pub user_ratings_total: Option<i32>,
    /// Phone number (formatted for local use)
    pub formatted_phone_number: Option<String>,
    /// Phone number (international format)
    pub international_phone_number: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Google Maps URL
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleGeometry {
    pub location: GoogleLocation,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Response from Place Details
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub result: Option<GooglePlace>,
    pub status: String,
    pub error_message: Option<String>,
}

/// Response from Place Autocomplete
#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<GooglePrediction>,
    pub status: String,
    pub error_message: Option<String>,
}

/// Single autocomplete prediction
#[derive(Debug, Deserialize)]
pub struct GooglePrediction {
    pub place_id: Option<String>,
    pub description: String,
}

/// Response from the Distance Matrix API
/// DOCUMENTATION: rows follow the origins order, elements the destinations order
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    pub distance: Option<ValueField>,
    pub duration: Option<ValueField>,
}

/// `{ "text": "1.2 km", "value": 1200 }`
#[derive(Debug, Deserialize)]
pub struct ValueField {
    pub value: u64,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Default endpoints, 10 requests per second
    pub fn new(api_key: String) -> Self {
        Self::with_settings(
            Client::new(),
            api_key,
            DEFAULT_PLACES_BASE_URL.to_string(),
            DEFAULT_DISTANCE_MATRIX_URL.to_string(),
            NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
        )
    }

    /// Create client from application configuration
    /// DOCUMENTATION: Applies request timeout, endpoints and rate limit from Config
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PlacesError::ConfigError(format!("HTTP client: {}", e)))?;

        let per_second = NonZeroU32::new(config.api_requests_per_second).ok_or_else(|| {
            PlacesError::ConfigError("API_REQUESTS_PER_SECOND must be greater than zero".to_string())
        })?;

        Ok(Self::with_settings(
            client,
            config.google_places_api_key.clone(),
            config.places_base_url.clone(),
            config.distance_matrix_url.clone(),
            per_second,
        ))
    }

    fn with_settings(
        client: Client,
        api_key: String,
        base_url: String,
        distance_matrix_url: String,
        per_second: NonZeroU32,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            distance_matrix_url,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        }
    }

    /// Perform a throttled GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                log::error!("Google API request failed: {}", e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google API error {}: {}", status, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse Google API response: {}", e);
            PlacesError::ExternalApiError(format!("Parse error: {}", e))
        })
    }

    /// Map a Place Details response to a Place
    pub fn parse_details(response: DetailsResponse, place_id: &str) -> Result<Place, PlacesError> {
        match response.status.as_str() {
            "OK" => response
                .result
                .map(Self::to_place)
                .ok_or_else(|| PlacesError::NotFound(place_id.to_string())),
            "NOT_FOUND" | "ZERO_RESULTS" => Err(PlacesError::NotFound(place_id.to_string())),
            other => Err(Self::status_error(other, response.error_message)),
        }
    }

    /// Map an Autocomplete response to suggestions
    pub fn parse_autocomplete(response: AutocompleteResponse) -> Result<Vec<Suggestion>, PlacesError> {
        match response.status.as_str() {
            "OK" => Ok(response
                .predictions
                .into_iter()
                .map(|p| Suggestion::new(p.place_id.unwrap_or_default(), p.description))
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(Self::status_error(other, response.error_message)),
        }
    }

    /// Map a Distance Matrix response onto the requested place ids
    /// DOCUMENTATION: Elements with a non-OK status (e.g. NOT_FOUND, ZERO_RESULTS)
    /// are left out of the matrix.
    pub fn parse_distance_matrix(
        response: DistanceMatrixResponse,
        place_ids: &[String],
    ) -> Result<DistanceMatrix, PlacesError> {
        if response.status != "OK" {
            return Err(Self::status_error(&response.status, response.error_message));
        }

        let mut matrix = DistanceMatrix::new();
        for (origin, row) in place_ids.iter().zip(response.rows) {
            for (destination, element) in place_ids.iter().zip(row.elements) {
                if element.status != "OK" {
                    continue;
                }
                if let (Some(distance), Some(duration)) = (element.distance, element.duration) {
                    matrix.insert(
                        origin,
                        destination,
                        Distance {
                            meters: distance.value,
                            seconds: duration.value,
                        },
                    );
                }
            }
        }

        Ok(matrix)
    }

    /// Convert GooglePlace to Place
    pub fn to_place(google_place: GooglePlace) -> Place {
        Place {
            id: google_place.place_id,
            name: google_place.name,
            formatted_address: google_place.formatted_address,
            location: google_place
                .geometry
                .map(|g| Location {
                    lat: g.location.lat,
                    lng: g.location.lng,
                })
                .unwrap_or_default(),
            types: google_place.types,
            rating: google_place.rating,
            user_ratings_total: google_place.user_ratings_total,
            phone_number: google_place
                .formatted_phone_number
                .or(google_place.international_phone_number),
            website: google_place.website,
            url: google_place.url,
        }
    }

    /// Map a non-OK API status to an error
    fn status_error(status: &str, error_message: Option<String>) -> PlacesError {
        match status {
            "OVER_QUERY_LIMIT" => {
                log::error!("Google API quota exceeded");
                PlacesError::RateLimitExceeded
            }
            "INVALID_REQUEST" => PlacesError::InvalidInput(
                error_message.unwrap_or_else(|| "Invalid request".to_string()),
            ),
            other => {
                let msg = error_message.unwrap_or_else(|| format!("Unknown status: {}", other));
                log::error!("Google API unexpected status {}: {}", other, msg);
                PlacesError::ExternalApiError(msg)
            }
        }
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn get_place_detail(&self, place_id: &str) -> Result<Place, PlacesError> {
        let url = format!("{}/details/json", self.base_url);
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let response: DetailsResponse = self
            .get_json(&url, &[("place_id", place_id), ("fields", DETAIL_FIELDS)])
            .await?;

        Self::parse_details(response, place_id)
    }

    async fn get_place_autocomplete_suggestions(
        &self,
        keyword: &str,
    ) -> Result<Vec<Suggestion>, PlacesError> {
        let url = format!("{}/autocomplete/json", self.base_url);
        log::debug!("Google Places autocomplete: keyword={}", keyword);

        let response: AutocompleteResponse = self.get_json(&url, &[("input", keyword)]).await?;

        Self::parse_autocomplete(response)
    }

    async fn get_places_distance(
        &self,
        place_ids: &[String],
    ) -> Result<DistanceMatrix, PlacesError> {
        if place_ids.is_empty() {
            return Ok(DistanceMatrix::new());
        }

        let waypoints = place_ids
            .iter()
            .map(|id| format!("place_id:{}", id))
            .collect::<Vec<_>>()
            .join("|");

        log::debug!("Google distance matrix lookup: {} places", place_ids.len());

        let response: DistanceMatrixResponse = self
            .get_json(
                &self.distance_matrix_url,
                &[("origins", waypoints.as_str()), ("destinations", waypoints.as_str())],
            )
            .await?;

        Self::parse_distance_matrix(response, place_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_details() {
        let response: DetailsResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "result": {
                    "place_id": "ChIJ123",
                    "name": "Cafe Louvre",
                    "formatted_address": "Národní 22, Praha",
                    "geometry": { "location": { "lat": 50.082, "lng": 14.418 } },
                    "types": ["cafe", "food"],
                    "rating": 4.4,
                    "user_ratings_total": 9000,
                    "international_phone_number": "+420 224 930 949"
                }
            }"#,
        )
        .unwrap();

        let place = assert_ok!(GooglePlacesClient::parse_details(response, "ChIJ123"));

        assert_eq!(place.id, "ChIJ123");
        assert_eq!(place.name, "Cafe Louvre");
        assert_eq!(place.location, Location { lat: 50.082, lng: 14.418 });
        assert_eq!(place.types, vec!["cafe".to_string(), "food".to_string()]);
        assert_eq!(place.user_ratings_total, Some(9000));
        assert_eq!(place.phone_number, Some("+420 224 930 949".to_string()));
    }

    #[test]
    fn test_parse_details_statuses() {
        let not_found: DetailsResponse =
            serde_json::from_str(r#"{"status": "NOT_FOUND"}"#).unwrap();
        assert_eq!(
            GooglePlacesClient::parse_details(not_found, "x"),
            Err(PlacesError::NotFound("x".to_string()))
        );

        let over_limit: DetailsResponse =
            serde_json::from_str(r#"{"status": "OVER_QUERY_LIMIT"}"#).unwrap();
        assert_eq!(
            GooglePlacesClient::parse_details(over_limit, "x"),
            Err(PlacesError::RateLimitExceeded)
        );

        let denied: DetailsResponse = serde_json::from_str(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#,
        )
        .unwrap();
        assert_eq!(
            GooglePlacesClient::parse_details(denied, "x"),
            Err(PlacesError::ExternalApiError(
                "The provided API key is invalid.".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_autocomplete() {
        let response: AutocompleteResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "predictions": [
                    { "place_id": "p1", "description": "Cafe Louvre, Praha" },
                    { "description": "cafe near me" }
                ]
            }"#,
        )
        .unwrap();

        let suggestions = assert_ok!(GooglePlacesClient::parse_autocomplete(response));

        assert_eq!(
            suggestions,
            vec![
                Suggestion::new("p1", "Cafe Louvre, Praha"),
                Suggestion::new("", "cafe near me"),
            ]
        );

        let empty: AutocompleteResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS", "predictions": []}"#).unwrap();
        assert!(assert_ok!(GooglePlacesClient::parse_autocomplete(empty)).is_empty());

        let invalid: AutocompleteResponse =
            serde_json::from_str(r#"{"status": "INVALID_REQUEST"}"#).unwrap();
        assert_err!(GooglePlacesClient::parse_autocomplete(invalid));
    }

    #[test]
    fn test_parse_distance_matrix_skips_failed_elements() {
        let response: DistanceMatrixResponse = serde_json::from_str(
            r#"{
                "status": "OK",
                "rows": [
                    { "elements": [
                        { "status": "OK", "distance": { "text": "1 m", "value": 0 }, "duration": { "text": "1 min", "value": 0 } },
                        { "status": "OK", "distance": { "text": "1.2 km", "value": 1200 }, "duration": { "text": "5 mins", "value": 300 } }
                    ] },
                    { "elements": [
                        { "status": "ZERO_RESULTS" },
                        { "status": "OK", "distance": { "text": "1 m", "value": 0 }, "duration": { "text": "1 min", "value": 0 } }
                    ] }
                ]
            }"#,
        )
        .unwrap();

        let matrix = assert_ok!(GooglePlacesClient::parse_distance_matrix(
            response,
            &ids(&["a", "b"])
        ));

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get("a", "b"), Some(Distance { meters: 1200, seconds: 300 }));
        assert_eq!(matrix.get("b", "a"), None);
    }

    #[test]
    fn test_parse_distance_matrix_error_status() {
        let response: DistanceMatrixResponse =
            serde_json::from_str(r#"{"status": "MAX_ELEMENTS_EXCEEDED", "rows": []}"#).unwrap();

        assert_eq!(
            GooglePlacesClient::parse_distance_matrix(response, &ids(&["a"])),
            Err(PlacesError::ExternalApiError(
                "Unknown status: MAX_ELEMENTS_EXCEEDED".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_empty_distance_request_skips_network() {
        let client = GooglePlacesClient::new("test_key".to_string());

        let matrix = assert_ok!(client.get_places_distance(&[]).await);

        assert!(matrix.is_empty());
    }

    #[test]
    fn test_from_config_rejects_zero_rate() {
        let mut config = Config::from_lookup(|_| None);
        config.api_requests_per_second = 0;

        assert!(matches!(
            GooglePlacesClient::from_config(&config),
            Err(PlacesError::ConfigError(_))
        ));
    }
}
