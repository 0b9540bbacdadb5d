// src/models/distance.rs
// DOCUMENTATION: Pairwise travel distances among a set of places
// PURPOSE: Value type returned by distance lookups; never cached

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Travel distance and duration between two places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    /// Distance in meters
    pub meters: u64,
    /// Travel time in seconds
    pub seconds: u64,
}

/// Distance matrix keyed by origin place id, then destination place id
/// DOCUMENTATION: `DistanceMatrix::new()` is the canonical empty matrix,
/// substituted by the lookup service whenever the provider fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    distances: HashMap<String, HashMap<String, Distance>>,
}

impl DistanceMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the distance from `origin` to `destination`
    pub fn insert(&mut self, origin: &str, destination: &str, distance: Distance) {
        self.distances
            .entry(origin.to_string())
            .or_default()
            .insert(destination.to_string(), distance);
    }

    /// Distance from `origin` to `destination`, if known
    pub fn get(&self, origin: &str, destination: &str) -> Option<Distance> {
        self.distances
            .get(origin)
            .and_then(|row| row.get(destination))
            .copied()
    }

    /// Number of origin/destination pairs stored
    pub fn len(&self) -> usize {
        self.distances.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
