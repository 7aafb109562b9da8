// src/handlers/enrich.rs
// DOCUMENTATION: HTTP handlers for photo enrichment
// PURPOSE: Enrich hotels and activities of generated itineraries

use crate::errors::PlacesError;
use crate::models::{
    EnrichActivityRequest, EnrichHotelRequest, FallbackQuery, FallbackResponse, ItineraryPhotos,
};
use crate::models::EntityKind;
use crate::services::{fallback_photos_for, PhotoEnricher};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// POST /api/enrich/hotel
pub async fn enrich_hotel(
    enricher: web::Data<PhotoEnricher>,
    req: web::Json<EnrichHotelRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let hotel = enricher.enrich(&req.hotel, &req.city).await;
    Ok(HttpResponse::Ok().json(hotel))
}

/// POST /api/enrich/activity
pub async fn enrich_activity(
    enricher: web::Data<PhotoEnricher>,
    req: web::Json<EnrichActivityRequest>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    let activity = enricher.enrich(&req.activity, &req.city).await;
    Ok(HttpResponse::Ok().json(activity))
}

/// POST /api/enrich/itinerary
/// Enrich all hotels and activities concurrently
pub async fn enrich_itinerary(
    enricher: web::Data<PhotoEnricher>,
    req: web::Json<ItineraryPhotos>,
) -> Result<impl Responder, PlacesError> {
    if let Err(e) = req.validate() {
        return Err(PlacesError::ValidationError(e.to_string()));
    }

    log::info!(
        "Enriching itinerary for '{}': {} hotels, {} activities",
        req.city,
        req.hotels.len(),
        req.activities.len()
    );

    let itinerary = enricher.enrich_itinerary(&req).await;
    Ok(HttpResponse::Ok().json(itinerary))
}

/// GET /api/enrich/fallback?name=..&city=..&kind=..
pub async fn fallback_photos(query: web::Query<FallbackQuery>) -> impl Responder {
    let kind = match query.kind.as_deref() {
        Some(kind) if kind.eq_ignore_ascii_case("hotel") => EntityKind::Hotel,
        _ => EntityKind::Activity,
    };
    let photos = fallback_photos_for(kind, query.name.as_deref(), query.city.as_deref());
    HttpResponse::Ok().json(FallbackResponse { photos })
}

/// GET /api/enrich/cache/stats
pub async fn cache_stats(enricher: web::Data<PhotoEnricher>) -> impl Responder {
    HttpResponse::Ok().json(enricher.cache().stats().await)
}

/// DELETE /api/enrich/cache
pub async fn clear_cache(enricher: web::Data<PhotoEnricher>) -> impl Responder {
    let removed = enricher.cache().clear().await;
    HttpResponse::Ok().json(json!({ "removed": removed }))
}

/// Configuration for enrichment routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrich")
            .route("/hotel", web::post().to(enrich_hotel))
            .route("/activity", web::post().to(enrich_activity))
            .route("/itinerary", web::post().to(enrich_itinerary))
            .route("/fallback", web::get().to(fallback_photos))
            .route("/cache/stats", web::get().to(cache_stats))
            .route("/cache", web::delete().to(clear_cache)),
    );
}
