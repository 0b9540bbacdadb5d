// src/models/place.rs
// DOCUMENTATION: Core data structure for a place fetched from the provider
// PURPOSE: Immutable value shared between the remote client, the cache and callers

use serde::{Deserialize, Serialize};

/// Represents a place (point of interest) returned by the remote provider
/// DOCUMENTATION: Identified by the provider's place id. Once fetched it is
/// treated as immutable and cached as JSON under `place_<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider's unique place identifier
    pub id: String,

    /// Place name
    pub name: String,

    /// Human readable address
    #[serde(default)]
    pub formatted_address: Option<String>,

    /// Geographic coordinates
    #[serde(default)]
    pub location: Location,

    /// Provider place types (e.g., ["cafe", "food"])
    #[serde(default)]
    pub types: Vec<String>,

    /// Rating (0-5)
    #[serde(default)]
    pub rating: Option<f32>,

    /// Number of user ratings
    #[serde(default)]
    pub user_ratings_total: Option<i32>,

    /// Phone number
    #[serde(default)]
    pub phone_number: Option<String>,

    /// Website URL
    #[serde(default)]
    pub website: Option<String>,

    /// Provider maps URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    /// Minimal place carrying only an id and a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_json_roundtrip_keeps_fields() {
        let place = Place {
            id: "ChIJ123".to_string(),
            name: "Cafe Louvre".to_string(),
            formatted_address: Some("Národní 22, Praha".to_string()),
            location: Location { lat: 50.082, lng: 14.418 },
            types: vec!["cafe".to_string()],
            rating: Some(4.4),
            ..Default::default()
        };

        let json = serde_json::to_string(&place).unwrap();
        let decoded: Place = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, place);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let decoded: Place = serde_json::from_str(r#"{"id":"a","name":"A"}"#).unwrap();

        assert_eq!(decoded, Place::new("a", "A"));
        assert!(decoded.types.is_empty());
    }
}
