// src/services/place_service.rs
// DOCUMENTATION: Cache-or-fetch lookups for places, suggestions and distances
// PURPOSE: Intermediary between callers, the cache and the remote places provider

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{DistanceMatrix, Place, Suggestion};
use crate::services::{start_cleanup_task, Cache, GooglePlacesClient, PlacesApi, PlacesCache};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};

pub const CACHE_PREFIX_PLACE: &str = "place_";
pub const CACHE_PREFIX_SUGGESTION: &str = "suggestion_";

/// Outcome of a batch place lookup
/// DOCUMENTATION: `places` is unordered. `failed_ids` lists identifiers for
/// which nothing could be returned (one entry per failed input occurrence).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceBatch {
    pub places: Vec<Place>,
    pub failed_ids: Vec<String>,
}

/// Place lookup service
/// DOCUMENTATION: Every operation degrades to an empty value on provider
/// failure; errors are logged, never returned.
#[derive(Clone)]
pub struct PlaceLookupService {
    cache: Arc<dyn Cache>,
    api: Arc<dyn PlacesApi>,
}

impl PlaceLookupService {
    pub fn new(cache: Arc<dyn Cache>, api: Arc<dyn PlacesApi>) -> Self {
        Self { cache, api }
    }

    /// Wire the service from configuration
    /// DOCUMENTATION: In-memory cache with a background cleanup task and the
    /// Google client. Must be called from within a tokio runtime.
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        // The cleanup task ends on its own once the service (and its cache) is dropped
        let (service, _cleanup) = Self::wire(config)?;
        Ok(service)
    }

    fn wire(config: &Config) -> Result<(Self, JoinHandle<()>), PlacesError> {
        config.validate()?;

        if tokio::runtime::Handle::try_current().is_err() {
            return Err(PlacesError::ConfigError(
                "PlaceLookupService must be built inside a tokio runtime".to_string(),
            ));
        }

        let api = GooglePlacesClient::from_config(config)?;

        let cache = Arc::new(PlacesCache::new());
        let cleanup = start_cleanup_task(&cache, config.cleanup_interval());
        log::info!(
            "Initialized places cache (cleanup interval: {}s)",
            config.cache_cleanup_interval
        );

        Ok((Self::new(cache, Arc::new(api)), cleanup))
    }

    /// Fetch many places concurrently
    /// DOCUMENTATION: Order of the result is not related to the input order;
    /// identifiers that could not be fetched are silently left out.
    pub async fn get_places_by_ids(&self, place_ids: &[String]) -> Vec<Place> {
        self.lookup_places_by_ids(place_ids).await.places
    }

    /// Fetch many places concurrently, reporting which identifiers failed
    /// DOCUMENTATION: One task per identifier; returns once every task has
    /// finished. Dropping the returned future aborts the outstanding tasks.
    pub async fn lookup_places_by_ids(&self, place_ids: &[String]) -> PlaceBatch {
        let mut batch = PlaceBatch::default();
        if place_ids.is_empty() {
            return batch;
        }

        let mut outstanding: HashMap<String, usize> = HashMap::new();
        let mut tasks = JoinSet::new();

        for place_id in place_ids {
            *outstanding.entry(place_id.clone()).or_default() += 1;

            let service = self.clone();
            let place_id = place_id.clone();
            tasks.spawn(async move {
                let place = service.get_place(&place_id).await;
                (place_id, place)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((place_id, place)) => {
                    if let Some(count) = outstanding.get_mut(&place_id) {
                        *count -= 1;
                    }
                    match place {
                        Some(place) => batch.places.push(place),
                        None => batch.failed_ids.push(place_id),
                    }
                }
                Err(e) => log::error!("Place lookup task failed: err={}", e),
            }
        }

        // Whatever is still outstanding belongs to tasks that panicked
        for (place_id, count) in outstanding {
            if count == 0 {
                continue;
            }
            log::error!(
                "Cannot get place: placeID={} err=lookup task panicked",
                place_id
            );
            batch
                .failed_ids
                .extend(std::iter::repeat(place_id).take(count));
        }

        batch
    }

    async fn get_place(&self, place_id: &str) -> Option<Place> {
        let key = format!("{}{}", CACHE_PREFIX_PLACE, place_id);

        if let Some(place) = self.cached::<Place>(&key).await {
            log::info!("Returning cached place: placeID={}", place_id);
            return Some(place);
        }

        match self.api.get_place_detail(place_id).await {
            Ok(place) => {
                self.store(key, &place).await;
                Some(place)
            }
            Err(e) => {
                log::error!("Cannot get place: placeID={} err={}", place_id, e);
                None
            }
        }
    }

    /// Autocomplete suggestions for a keyword, cached per keyword
    pub async fn get_suggestions(&self, keyword: &str) -> Vec<Suggestion> {
        let key = format!("{}{}", CACHE_PREFIX_SUGGESTION, keyword);

        if let Some(suggestions) = self.cached::<Vec<Suggestion>>(&key).await {
            log::info!("Returning cached suggestions: keyword={}", keyword);
            return suggestions;
        }

        match self.api.get_place_autocomplete_suggestions(keyword).await {
            Ok(suggestions) => {
                self.store(key, &suggestions).await;
                suggestions
            }
            Err(e) => {
                log::error!("Cannot get suggestions: keyword={} err={}", keyword, e);
                Vec::new()
            }
        }
    }

    /// Pairwise distances among places; never cached
    pub async fn get_distances(&self, place_ids: &[String]) -> DistanceMatrix {
        match self.api.get_places_distance(place_ids).await {
            Ok(matrix) => matrix,
            Err(e) => {
                log::error!("Cannot get distances: places={:?} err={}", place_ids, e);
                DistanceMatrix::new()
            }
        }
    }

    /// Read and decode a cached value; undecodable entries count as a miss
    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring undecodable cache entry: key={} err={}", key, e);
                None
            }
        }
    }

    /// Encode and store a value with no expiry
    async fn store<T: Serialize>(&self, key: String, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.cache.set(key, json, None).await,
            Err(e) => log::error!("Cannot cache value: key={} err={}", key, e),
        }
    }
}
