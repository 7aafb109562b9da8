// src/handlers/places.rs
// DOCUMENTATION: Google Places proxy routes
// PURPOSE: Let browsers and remote enrichers use the provider without ever
// seeing the API key

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{
    PhotoRedirectQuery, PhotoReferencesRequest, PhotoReferencesResponse, PlaceDetailsRequest,
    TextSearchRequest,
};
use crate::services::GooglePlacesClient;
use actix_web::{http::header, web, HttpResponse, Responder};
use validator::Validate;

/// POST /api/places/search
/// Provider text search for a free-text query
pub async fn search(
    client: web::Data<GooglePlacesClient>,
    req: web::Json<TextSearchRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let response = client.text_search(&req.query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/places/details
/// Place details by place id, or for the best match of a query
pub async fn details(
    client: web::Data<GooglePlacesClient>,
    req: web::Json<PlaceDetailsRequest>,
) -> Result<impl Responder, PlacesError> {
    let req = req.into_inner();
    let fields = req.fields.as_deref().filter(|f| !f.trim().is_empty());

    let response = match (non_blank(&req.place_id), non_blank(&req.query)) {
        (Some(place_id), _) => client.place_details(place_id, fields).await?,
        (None, Some(query)) => client.place_details_for_query(query, fields).await?,
        (None, None) => {
            return Err(PlacesError::InvalidInput(
                "placeId or query is required".to_string(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/places/photos
/// Photo references for a query via the search -> details chain
pub async fn photos(
    client: web::Data<GooglePlacesClient>,
    req: web::Json<PhotoReferencesRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let photo_references = client.photo_references_for_query(&req.query).await?;
    Ok(HttpResponse::Ok().json(PhotoReferencesResponse { photo_references }))
}

/// GET /api/places/photo?photoReference=..&maxwidth=..
/// Redirect to the provider's binary photo endpoint
pub async fn photo(
    client: web::Data<GooglePlacesClient>,
    config: web::Data<Config>,
    query: web::Query<PhotoRedirectQuery>,
) -> Result<impl Responder, PlacesError> {
    if !client.has_api_key() {
        return Err(PlacesError::Configuration(
            "Google Places API key not configured".to_string(),
        ));
    }

    let reference = non_blank(&query.photo_reference)
        .ok_or_else(|| PlacesError::InvalidInput("photoReference is required".to_string()))?;
    let max_width = query
        .maxwidth
        .filter(|w| *w > 0)
        .unwrap_or(config.photo_max_width)
        .min(1600);

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, client.photo_media_url(reference, max_width)))
        .finish())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Configuration for places proxy routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/places")
            .route("/search", web::post().to(search))
            .route("/details", web::post().to(details))
            .route("/photos", web::post().to(photos))
            .route("/photo", web::get().to(photo)),
    );
}
