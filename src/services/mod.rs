// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cache;
pub mod enrichment;
pub mod fallback_catalog;
pub mod gateway;
pub mod google_places_client;
pub mod normalizer;
pub mod photo_fetcher;
pub mod photo_url;
pub mod place_resolver;

pub use cache::*;
pub use enrichment::*;
pub use fallback_catalog::fallback_photos_for;
pub use gateway::*;
pub use google_places_client::*;
