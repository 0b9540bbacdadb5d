// src/models/suggestion.rs
// DOCUMENTATION: Autocomplete candidate for a partial search keyword

use serde::{Deserialize, Serialize};

/// Autocomplete suggestion
/// DOCUMENTATION: Cached as a sequence under `suggestion_<keyword>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Place id the suggestion resolves to (may be empty for query predictions)
    #[serde(default)]
    pub place_id: String,

    /// Text shown to the user (e.g., "Cafe Louvre, Národní, Prague")
    pub description: String,
}

impl Suggestion {
    pub fn new(place_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            place_id: place_id.into(),
            description: description.into(),
        }
    }
}
