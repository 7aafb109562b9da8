// src/services/enrichment.rs
// DOCUMENTATION: Photo enrichment orchestrator
// PURPOSE: Decide whether an itinerary entity needs photos, find them
// (cache -> live provider lookup -> fallback catalog) and merge them in
// without losing or duplicating existing images

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::{EntityKind, ImageEntry, ItineraryPhotos, PhotoEnrichable};
use crate::services::cache::PhotoCache;
use crate::services::fallback_catalog::fallback_photos_for;
use crate::services::gateway::{LocalRoutesGateway, PlacesGateway};
use crate::services::google_places_client::GooglePlacesClient;
use crate::services::photo_fetcher::PhotoFetcher;
use crate::services::photo_url::build_url;
use crate::services::place_resolver::PlaceResolver;
use futures::future::join_all;
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

/// Tunables of the pipeline
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    /// Valid image count at which an entity is left untouched
    pub sufficiency_threshold: usize,
    /// Photo references kept per entity
    pub max_photos_per_entity: usize,
    pub photo_max_width: u32,
    /// Base of generated photo URLs (the redirect route)
    pub photo_proxy_path: String,
    /// Deadline for each provider call
    pub request_timeout: Duration,
}

impl EnrichmentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sufficiency_threshold: config.sufficiency_threshold,
            max_photos_per_entity: config.max_photos_per_entity,
            photo_max_width: config.photo_max_width,
            photo_proxy_path: config.photo_proxy_path.clone(),
            request_timeout: config.request_timeout(),
        }
    }
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Where a resolved photo list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSource {
    Cache,
    Provider,
    Fallback,
}

pub struct PhotoEnricher {
    resolver: PlaceResolver,
    fetcher: PhotoFetcher,
    cache: Arc<PhotoCache>,
    settings: EnrichmentSettings,
}

impl PhotoEnricher {
    pub fn new(
        gateway: Arc<dyn PlacesGateway>,
        cache: Arc<PhotoCache>,
        settings: EnrichmentSettings,
    ) -> Self {
        Self {
            resolver: PlaceResolver::new(gateway.clone(), settings.request_timeout),
            fetcher: PhotoFetcher::new(
                gateway,
                settings.request_timeout,
                settings.max_photos_per_entity,
            ),
            cache,
            settings,
        }
    }

    /// Build the enricher the server runs with
    /// DOCUMENTATION: Goes through PLACES_GATEWAY_URL when configured,
    /// otherwise straight to the in-process Google client
    pub fn from_config(
        config: &Config,
        google_client: &GooglePlacesClient,
        cache: Arc<PhotoCache>,
    ) -> Result<Self, PlacesError> {
        let gateway: Arc<dyn PlacesGateway> = match &config.places_gateway_url {
            Some(base_url) => {
                log::info!("Photo enrichment via places gateway at {}", base_url);
                Arc::new(LocalRoutesGateway::new(base_url, config.request_timeout())?)
            }
            None => Arc::new(google_client.clone()),
        };

        Ok(Self::new(
            gateway,
            cache,
            EnrichmentSettings::from_config(config),
        ))
    }

    pub fn cache(&self) -> &Arc<PhotoCache> {
        &self.cache
    }

    /// Whether the entity has fewer valid images than the threshold
    pub fn needs_photos<E: PhotoEnrichable>(&self, entity: &E) -> bool {
        entity.existing_urls().len() < self.settings.sufficiency_threshold
    }

    /// Live provider lookup: resolve -> fetch references -> build URLs
    /// DOCUMENTATION: Empty when any stage comes back empty
    pub async fn live_photos(&self, kind: EntityKind, name: &str, city: &str) -> Vec<String> {
        let candidates = self.resolver.resolve_for(kind, name, city).await;
        let Some(top) = candidates.first() else {
            log::debug!("No place candidates for {} '{}' in '{}'", kind.as_str(), name, city);
            return Vec::new();
        };

        let references = self.fetcher.fetch_photo_references(top).await;
        references
            .iter()
            .map(|reference| {
                build_url(
                    &self.settings.photo_proxy_path,
                    reference,
                    self.settings.photo_max_width,
                )
            })
            .collect()
    }

    /// Photo URLs for a place, from cache, provider or fallback catalog
    /// DOCUMENTATION: The result is never empty and is cached either way
    pub async fn photos_for(
        &self,
        kind: EntityKind,
        name: &str,
        city: &str,
    ) -> (Vec<String>, PhotoSource) {
        let key = PhotoCache::generate_key(name, city);
        if let Some(cached) = self.cache.get(&key).await {
            return (cached, PhotoSource::Cache);
        }

        let live = self.live_photos(kind, name, city).await;
        let (photos, source) = if live.is_empty() {
            log::info!(
                "Using fallback photos for {} '{}' in '{}'",
                kind.as_str(),
                name,
                city
            );
            (
                fallback_photos_for(kind, Some(name), Some(city)),
                PhotoSource::Fallback,
            )
        } else {
            (live, PhotoSource::Provider)
        };

        self.cache.put(key, photos.clone()).await;
        (photos, source)
    }

    /// Enrich one entity
    /// DOCUMENTATION: Returns an updated copy and never fails. Entities
    /// at or above the sufficiency threshold come back unchanged. Every
    /// other outcome, including a panic inside the pipeline, sets the
    /// provenance flag.
    pub async fn enrich<E: PhotoEnrichable>(&self, entity: &E, city: &str) -> E {
        if !self.needs_photos(entity) {
            log::debug!(
                "{} '{}' already has enough photos",
                entity.kind().as_str(),
                entity.display_name()
            );
            return entity.clone();
        }

        let lookup = AssertUnwindSafe(self.photos_for(
            entity.kind(),
            entity.display_name(),
            city,
        ))
        .catch_unwind()
        .await;

        match lookup {
            Ok((photos, source)) => {
                let enriched = merge_photos(entity, &photos);
                log::info!(
                    "Enriched {} '{}' from {:?}: {} -> {} images",
                    entity.kind().as_str(),
                    entity.display_name(),
                    source,
                    entity.additional_images().len(),
                    enriched.additional_images().len()
                );
                enriched
            }
            Err(_) => {
                log::error!(
                    "Photo enrichment panicked for {} '{}'; leaving photos unchanged",
                    entity.kind().as_str(),
                    entity.display_name()
                );
                let mut unchanged = entity.clone();
                unchanged.mark_enriched();
                unchanged
            }
        }
    }

    /// Enrich many entities concurrently
    /// DOCUMENTATION: Output order matches input order; one entity's
    /// failure never affects the others
    pub async fn enrich_all<E: PhotoEnrichable>(&self, entities: &[E], city: &str) -> Vec<E> {
        join_all(entities.iter().map(|entity| self.enrich(entity, city))).await
    }

    /// Enrich every hotel and activity of an itinerary
    pub async fn enrich_itinerary(&self, itinerary: &ItineraryPhotos) -> ItineraryPhotos {
        let (hotels, activities) = futures::join!(
            self.enrich_all(&itinerary.hotels, &itinerary.city),
            self.enrich_all(&itinerary.activities, &itinerary.city)
        );

        ItineraryPhotos {
            city: itinerary.city.clone(),
            hotels,
            activities,
        }
    }
}

/// Merge resolved photo URLs into a copy of the entity
/// DOCUMENTATION: The list is always rewritten as the distinct valid
/// existing entries followed by the resolved URLs not already present
/// (by exact string). Entries with a blank URL are dropped even when they
/// carry a location. An empty primary image takes the first new URL.
/// The provenance flag is always set.
pub fn merge_photos<E: PhotoEnrichable>(entity: &E, resolved: &[String]) -> E {
    let mut merged = entity.clone();
    merged.mark_enriched();

    let mut seen = HashSet::new();
    let mut images: Vec<ImageEntry> = entity
        .additional_images()
        .iter()
        .filter(|img| img.is_valid() && seen.insert(img.url.clone()))
        .cloned()
        .collect();

    let new_urls: Vec<&String> = resolved
        .iter()
        .filter(|url| !url.trim().is_empty() && seen.insert(url.to_string()))
        .collect();
    images.extend(new_urls.iter().map(|url| ImageEntry::new(url.as_str())));

    if let Some(first) = new_urls.first() {
        if !merged.has_primary_image() {
            merged.set_primary_image((*first).clone());
        }
    }
    *merged.additional_images_mut() = images;

    merged
}
