// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod distance;
pub mod place;
pub mod suggestion;

pub use distance::*;
pub use place::*;
pub use suggestion::*;
