// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cache;
pub mod google_places_client;
pub mod place_service;
pub mod places_api;

pub use cache::*;
pub use google_places_client::*;
pub use place_service::*;
pub use places_api::*;
