// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use crate::services::GooglePlacesClient;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

pub async fn health_check(client: web::Data<GooglePlacesClient>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "traveller-photos",
        "version": env!("CARGO_PKG_VERSION"),
        "places_api_configured": client.has_api_key()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
