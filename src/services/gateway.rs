// src/services/gateway.rs
// DOCUMENTATION: Provider access seam used by the enrichment pipeline
// PURPOSE: Lets the pipeline talk either to Google directly (in-process)
// or to the /api/places/* routes of a gateway host

use crate::errors::PlacesError;
use crate::models::{PlaceDetailsRequest, TextSearchRequest};
use crate::services::google_places_client::{
    GooglePlace, GooglePlaceDetailsResponse, GoogleTextSearchResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// A provider match for a text search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: Option<String>,
    /// Photo references already present in the search response
    pub photo_references: Vec<String>,
}

impl From<&GooglePlace> for PlaceCandidate {
    fn from(place: &GooglePlace) -> Self {
        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            photo_references: place.photo_references(),
        }
    }
}

/// Text search and place-details photos, whatever sits behind them
#[async_trait]
pub trait PlacesGateway: Send + Sync {
    /// Candidates in provider relevance order
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError>;

    /// Photo references of a previously resolved place
    async fn photo_references(&self, place_id: &str) -> Result<Vec<String>, PlacesError>;
}

/// Run a gateway call under a deadline
/// DOCUMENTATION: Expiry becomes PlacesError::Timeout so callers can treat
/// it like any other failed lookup
pub async fn with_timeout<T, F>(timeout: Duration, call: F) -> Result<T, PlacesError>
where
    F: std::future::Future<Output = Result<T, PlacesError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(PlacesError::Timeout(timeout)),
    }
}

/// Gateway over the local /api/places/* routes of another host
/// DOCUMENTATION: Used when the enricher runs away from the API key, e.g.
/// a worker pointed at the public web server with PLACES_GATEWAY_URL
pub struct LocalRoutesGateway {
    client: Client,
    base_url: String,
}

impl LocalRoutesGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PlacesError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, PlacesError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Places gateway request to {} failed: {}", path, e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("Places gateway {} answered {}", path, status);
            return Err(PlacesError::ExternalApiError(format!(
                "Gateway error {} on {}",
                status, path
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PlacesError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl PlacesGateway for LocalRoutesGateway {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let body = TextSearchRequest {
            query: query.to_string(),
        };
        let response: GoogleTextSearchResponse =
            self.post_json("/api/places/search", &body).await?;

        Ok(response
            .results
            .iter()
            .filter(|place| !place.place_id.is_empty())
            .map(PlaceCandidate::from)
            .collect())
    }

    async fn photo_references(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let body = PlaceDetailsRequest {
            place_id: Some(place_id.to_string()),
            query: None,
            fields: Some("photos".to_string()),
        };
        let response: GooglePlaceDetailsResponse =
            self.post_json("/api/places/details", &body).await?;

        Ok(response
            .result
            .map(|place| place.photo_references())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::matchers::{all_of, json_decoded, request};
    use httptest::responders::{json_encoded, status_code};
    use httptest::{Expectation, Server};
    use serde_json::{json, Value};

    fn gateway_for(server: &Server) -> LocalRoutesGateway {
        LocalRoutesGateway::new(&server.url_str("/"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_search_posts_query() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("POST"),
                request::path("/api/places/search"),
                request::body(json_decoded(|body: &Value| {
                    body["query"] == "Hagia Sophia Istanbul landmark"
                })),
            ])
            .respond_with(json_encoded(json!({
                "status": "OK",
                "results": [
                    { "place_id": "ChIJ1", "name": "Hagia Sophia", "photos": [{ "photo_reference": "r1" }] },
                    { "name": "no id" }
                ]
            }))),
        );

        let candidates = gateway_for(&server)
            .search("Hagia Sophia Istanbul landmark")
            .await
            .unwrap();

        assert_eq!(
            candidates,
            vec![PlaceCandidate {
                place_id: "ChIJ1".to_string(),
                name: Some("Hagia Sophia".to_string()),
                photo_references: vec!["r1".to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_details_posts_place_id() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("POST"),
                request::path("/api/places/details"),
                request::body(json_decoded(|body: &Value| {
                    body["placeId"] == "ChIJ1" && body["fields"] == "photos"
                })),
            ])
            .respond_with(json_encoded(json!({
                "status": "OK",
                "result": { "photos": [{ "photo_reference": "a" }, { "photo_reference": "b" }] }
            }))),
        );

        let refs = gateway_for(&server).photo_references("ChIJ1").await.unwrap();
        assert_eq!(refs, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_missing_key_on_gateway_is_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/api/places/search"))
                .respond_with(status_code(500)),
        );

        let err = gateway_for(&server).search("x").await.unwrap_err();
        assert!(matches!(err, PlacesError::ExternalApiError(_)));
    }

    #[tokio::test]
    async fn test_timeout_reports_the_deadline() {
        let deadline = Duration::from_millis(20);
        let err = with_timeout(deadline, std::future::pending::<Result<(), PlacesError>>())
            .await
            .unwrap_err();

        assert!(matches!(err, PlacesError::Timeout(d) if d == deadline));
        assert_eq!(err.to_string(), "Request timed out after 20ms");
    }
}
