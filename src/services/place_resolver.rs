// src/services/place_resolver.rs
// DOCUMENTATION: Place resolver
// PURPOSE: Turn an entity name and city into provider place candidates

use crate::models::EntityKind;
use crate::services::gateway::{with_timeout, PlaceCandidate, PlacesGateway};
use crate::services::normalizer::normalize;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound of search variants issued per entity
const MAX_QUERY_VARIANTS: usize = 5;

pub struct PlaceResolver {
    gateway: Arc<dyn PlacesGateway>,
    timeout: Duration,
}

impl PlaceResolver {
    pub fn new(gateway: Arc<dyn PlacesGateway>, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Search strings for an entity, most specific first
    /// DOCUMENTATION: "{name} {city} {suffix}" per kind suffix, then the
    /// diacritic-folded form of the first variant when it differs.
    /// An empty name yields no variants.
    pub fn query_variants(kind: EntityKind, name: &str, city: &str) -> Vec<String> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        let city = city.trim();

        let mut variants: Vec<String> = Vec::new();
        let mut push = |query: String| {
            if !query.is_empty() && !variants.contains(&query) && variants.len() < MAX_QUERY_VARIANTS {
                variants.push(query);
            }
        };

        let suffixes = kind.query_suffixes();
        for suffix in suffixes {
            push(join_terms(&[name, city, *suffix]));
        }

        let first_suffix = suffixes.first().copied().unwrap_or_default();
        let (folded_name, folded_city) = (normalize(name), normalize(city));
        push(join_terms(&[folded_name.as_str(), folded_city.as_str(), first_suffix]));

        variants
    }

    /// Candidates for one search string
    /// DOCUMENTATION: Never fails; transport errors, non-2xx answers,
    /// malformed bodies and timeouts all come back as "no candidates"
    pub async fn resolve_candidates(&self, query: &str) -> Vec<PlaceCandidate> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match with_timeout(self.timeout, self.gateway.search(query)).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("Place search '{}' failed, treating as no candidates: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Candidates for an entity
    /// DOCUMENTATION: Every variant is searched concurrently; the first
    /// non-empty result set in variant order wins
    pub async fn resolve_for(&self, kind: EntityKind, name: &str, city: &str) -> Vec<PlaceCandidate> {
        let variants = Self::query_variants(kind, name, city);
        if variants.is_empty() {
            return Vec::new();
        }

        let results = join_all(variants.iter().map(|q| self.resolve_candidates(q))).await;

        results
            .into_iter()
            .find(|candidates| !candidates.is_empty())
            .unwrap_or_default()
    }
}

fn join_terms(terms: &[&str]) -> String {
    terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlacesError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Answers each query from a table; unknown queries fail
    struct TableGateway {
        answers: HashMap<String, Vec<&'static str>>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl PlacesGateway for TableGateway {
        async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.answers
                .get(query)
                .map(|ids| {
                    ids.iter()
                        .map(|id| PlaceCandidate {
                            place_id: id.to_string(),
                            name: None,
                            photo_references: Vec::new(),
                        })
                        .collect()
                })
                .ok_or_else(|| PlacesError::ExternalApiError("503".to_string()))
        }

        async fn photo_references(&self, _place_id: &str) -> Result<Vec<String>, PlacesError> {
            Ok(Vec::new())
        }
    }

    fn resolver(answers: &[(&str, Vec<&'static str>)]) -> PlaceResolver {
        let gateway = TableGateway {
            answers: answers
                .iter()
                .map(|(q, ids)| (q.to_string(), ids.clone()))
                .collect(),
            delay: None,
        };
        PlaceResolver::new(Arc::new(gateway), Duration::from_secs(5))
    }

    #[test]
    fn test_hotel_variants() {
        assert_eq!(
            PlaceResolver::query_variants(EntityKind::Hotel, "Çırağan Palace", "İstanbul"),
            vec![
                "Çırağan Palace İstanbul hotel".to_string(),
                "Ciragan Palace Istanbul hotel".to_string(),
            ]
        );
        assert_eq!(
            PlaceResolver::query_variants(EntityKind::Hotel, "Hilton", "Rome"),
            vec!["Hilton Rome hotel".to_string()]
        );
    }

    #[test]
    fn test_activity_variants() {
        let variants =
            PlaceResolver::query_variants(EntityKind::Activity, "Topkapı Sarayı", "İstanbul");
        assert_eq!(
            variants,
            vec![
                "Topkapı Sarayı İstanbul tourist attraction",
                "Topkapı Sarayı İstanbul landmark",
                "Topkapı Sarayı İstanbul",
                "Topkapi Sarayi Istanbul tourist attraction",
            ]
        );
        assert!(variants.len() <= MAX_QUERY_VARIANTS);
    }

    #[test]
    fn test_empty_name_has_no_variants() {
        assert!(PlaceResolver::query_variants(EntityKind::Activity, "  ", "Rome").is_empty());
        assert_eq!(
            PlaceResolver::query_variants(EntityKind::Hotel, "Hilton", ""),
            vec!["Hilton hotel".to_string()]
        );
    }

    #[tokio::test]
    async fn test_first_non_empty_variant_wins() {
        let resolver = resolver(&[
            ("Galata Tower Istanbul tourist attraction", vec![]),
            ("Galata Tower Istanbul landmark", vec!["landmark-hit"]),
            ("Galata Tower Istanbul", vec!["plain-hit"]),
        ]);

        let candidates = resolver
            .resolve_for(EntityKind::Activity, "Galata Tower", "Istanbul")
            .await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].place_id, "landmark-hit");
    }

    #[tokio::test]
    async fn test_failures_are_empty() {
        let resolver = resolver(&[]);
        assert!(resolver.resolve_candidates("anything").await.is_empty());
        assert!(resolver
            .resolve_for(EntityKind::Hotel, "Hilton", "Rome")
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_timeout_is_empty() {
        let gateway = TableGateway {
            answers: [("slow".to_string(), vec!["late"])].into_iter().collect(),
            delay: Some(Duration::from_millis(200)),
        };
        let resolver = PlaceResolver::new(Arc::new(gateway), Duration::from_millis(20));
        assert!(resolver.resolve_candidates("slow").await.is_empty());
    }
}
