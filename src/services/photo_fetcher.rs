// src/services/photo_fetcher.rs
// DOCUMENTATION: Photo reference fetcher
// PURPOSE: Collect the provider photo references of a resolved place

use crate::services::gateway::{with_timeout, PlaceCandidate, PlacesGateway};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub struct PhotoFetcher {
    gateway: Arc<dyn PlacesGateway>,
    timeout: Duration,
    max_photos: usize,
}

impl PhotoFetcher {
    pub fn new(gateway: Arc<dyn PlacesGateway>, timeout: Duration, max_photos: usize) -> Self {
        Self {
            gateway,
            timeout,
            max_photos,
        }
    }

    /// Photo references of a candidate, capped at `max_photos`
    /// DOCUMENTATION: Place details are asked first. When they fail or
    /// carry no photos, the references already attached to the search
    /// candidate are used. Duplicates are dropped, provider order kept.
    pub async fn fetch_photo_references(&self, candidate: &PlaceCandidate) -> Vec<String> {
        let details = match with_timeout(
            self.timeout,
            self.gateway.photo_references(&candidate.place_id),
        )
        .await
        {
            Ok(references) => references,
            Err(e) => {
                log::warn!(
                    "Photo lookup for place {} failed: {}",
                    candidate.place_id,
                    e
                );
                Vec::new()
            }
        };

        let references = if details.is_empty() {
            candidate.photo_references.clone()
        } else {
            details
        };

        let mut seen = HashSet::new();
        references
            .into_iter()
            .filter(|r| !r.trim().is_empty() && seen.insert(r.clone()))
            .take(self.max_photos)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlacesError;
    use async_trait::async_trait;

    struct FixedDetails(Result<Vec<&'static str>, ()>);

    #[async_trait]
    impl PlacesGateway for FixedDetails {
        async fn search(&self, _query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
            Ok(Vec::new())
        }

        async fn photo_references(&self, _place_id: &str) -> Result<Vec<String>, PlacesError> {
            self.0
                .clone()
                .map(|refs| refs.into_iter().map(str::to_string).collect())
                .map_err(|_| PlacesError::MalformedResponse("no photos field".to_string()))
        }
    }

    fn candidate(search_refs: &[&str]) -> PlaceCandidate {
        PlaceCandidate {
            place_id: "ChIJ1".to_string(),
            name: None,
            photo_references: search_refs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fetcher(details: Result<Vec<&'static str>, ()>, cap: usize) -> PhotoFetcher {
        PhotoFetcher::new(Arc::new(FixedDetails(details)), Duration::from_secs(5), cap)
    }

    #[tokio::test]
    async fn test_details_references_are_capped() {
        let refs = fetcher(Ok(vec!["a", "b", "a", "", "c", "d"]), 3)
            .fetch_photo_references(&candidate(&["s"]))
            .await;
        assert_eq!(refs, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_search_references_used_when_details_empty() {
        let refs = fetcher(Ok(vec![]), 20)
            .fetch_photo_references(&candidate(&["s1", "s2"]))
            .await;
        assert_eq!(refs, vec!["s1", "s2"]);
    }

    #[tokio::test]
    async fn test_failure_without_search_photos_is_empty() {
        let refs = fetcher(Err(()), 20)
            .fetch_photo_references(&candidate(&[]))
            .await;
        assert!(refs.is_empty());
    }
}
