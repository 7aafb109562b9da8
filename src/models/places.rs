// src/models/places.rs
// DOCUMENTATION: Request/response bodies of the HTTP routes
// PURPOSE: Wire format of the /api/places proxy and /api/enrich routes

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Activity, Hotel};

/// POST /api/places/search body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TextSearchRequest {
    #[validate(length(min = 1, max = 512))]
    pub query: String,
}

/// POST /api/places/details body
/// DOCUMENTATION: Either a resolved place id or a free-text query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

/// POST /api/places/photos body
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PhotoReferencesRequest {
    #[validate(length(min = 1, max = 512))]
    pub query: String,
}

/// POST /api/places/photos response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoReferencesResponse {
    #[serde(default)]
    pub photo_references: Vec<String>,
}

/// GET /api/places/photo query string
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRedirectQuery {
    #[serde(rename = "photoReference", alias = "photoreference", default)]
    pub photo_reference: Option<String>,
    #[serde(default)]
    pub maxwidth: Option<u32>,
}

/// POST /api/enrich/hotel body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrichHotelRequest {
    pub hotel: Hotel,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub city: String,
}

/// POST /api/enrich/activity body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrichActivityRequest {
    pub activity: Activity,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub city: String,
}

/// POST /api/enrich/itinerary body and response
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItineraryPhotos {
    #[validate(length(max = 256))]
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// GET /api/enrich/fallback query string
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// "hotel" or "activity" (default)
    #[serde(default)]
    pub kind: Option<String>,
}

/// GET /api/enrich/fallback response
#[derive(Debug, Clone, Serialize)]
pub struct FallbackResponse {
    pub photos: Vec<String>,
}
