// src/lib.rs
// DOCUMENTATION: Crate root
// PURPOSE: Place details, autocomplete suggestions and distances from a remote
// places provider, with caching in front of the provider

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::{init_logging, Config};
pub use errors::PlacesError;
pub use models::{Distance, DistanceMatrix, Location, Place, Suggestion};
pub use services::{
    Cache, GooglePlacesClient, PlaceBatch, PlaceLookupService, PlacesApi, PlacesCache,
};
