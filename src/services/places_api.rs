// src/services/places_api.rs
// DOCUMENTATION: Port for the remote places provider
// PURPOSE: Lets the lookup service run against Google or a test double

use crate::errors::PlacesError;
use crate::models::{DistanceMatrix, Place, Suggestion};
use async_trait::async_trait;

/// Remote places provider
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Detailed information about a single place
    async fn get_place_detail(&self, place_id: &str) -> Result<Place, PlacesError>;

    /// Autocomplete candidates for a partial keyword
    async fn get_place_autocomplete_suggestions(
        &self,
        keyword: &str,
    ) -> Result<Vec<Suggestion>, PlacesError>;

    /// Pairwise distances among all given places
    async fn get_places_distance(&self, place_ids: &[String])
        -> Result<DistanceMatrix, PlacesError>;
}
