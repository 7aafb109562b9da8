// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, provider client, photo cache and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::{start_cleanup_task, GooglePlacesClient, PhotoCache, PhotoEnricher};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting traveller-photos service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Provider client (holds the API key)
    let google_client = match GooglePlacesClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create Google Places client: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Photo cache shared by every worker
    let cache = Arc::new(match config.photo_cache_ttl_secs {
        Some(ttl) => {
            log::info!("Initialized photo cache (TTL: {}s)", ttl);
            PhotoCache::with_ttl(ttl)
        }
        None => {
            log::info!("Initialized photo cache (process lifetime)");
            PhotoCache::new()
        }
    });

    if cache.ttl().is_some() {
        start_cleanup_task(cache.clone(), 300);
        log::info!("Started cache cleanup task (interval: 5 minutes)");
    }

    // 6. Enrichment pipeline
    let enricher = match PhotoEnricher::from_config(&config, &google_client, cache) {
        Ok(enricher) => web::Data::new(enricher),
        Err(e) => {
            log::error!("Failed to create photo enricher: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Photo enrichment: threshold={}, max photos={}, timeout={}s",
        config.sufficiency_threshold,
        config.max_photos_per_entity,
        config.request_timeout_secs
    );

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let google_client = web::Data::new(google_client);
    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            // Application state (config, provider client, enricher)
            .app_data(config_data.clone())
            .app_data(google_client.clone())
            .app_data(enricher.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::places_config)
            .configure(handlers::enrich_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
