// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Server-side access to text search, place details and photo media.
// The API key only ever lives here.

use crate::config::Config;
use crate::errors::PlacesError;
use crate::services::gateway::{PlaceCandidate, PlacesGateway};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use url::form_urlencoded;

/// Fields requested from Place Details when the caller does not choose
pub const DEFAULT_DETAILS_FIELDS: &str = "place_id,name,photos";

/// Google Places API client
/// DOCUMENTATION: Handles authentication, rate limiting and API calls to Google Places
#[derive(Clone)]
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
    /// Outbound request limiter shared by every clone
    limiter: Arc<DefaultDirectRateLimiter>,
    /// Cap applied by the search -> details photo chain
    max_photos: usize,
}

/// Response from Google Places Text Search
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GoogleTextSearchResponse {
    /// Results array from API
    #[serde(default)]
    pub results: Vec<GooglePlace>,
    /// Status of the API call
    pub status: String,
    /// Next page token (if more results available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    /// Error message (if status is not OK)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Response from Google Place Details
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlaceDetailsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GooglePlace>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Individual place from Google Places API
/// DOCUMENTATION: Only the parts the photo pipeline reads; unknown fields are dropped
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePlace {
    /// Google's unique place identifier
    #[serde(default)]
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<GooglePhoto>>,
}

impl GooglePlace {
    /// Photo references in provider order
    pub fn photo_references(&self) -> Vec<String> {
        self.photos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|p| !p.photo_reference.is_empty())
            .map(|p| p.photo_reference.clone())
            .collect()
    }
}

/// Photo from Google Places
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GooglePhoto {
    /// Photo reference (used to fetch actual photo)
    #[serde(default)]
    pub photo_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    /// HTML attributions (required by Google)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_attributions: Option<Vec<String>>,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Initializes client with API key, base URL, per-request timeout and rate limit
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: Duration,
        max_requests_per_second: u32,
        max_photos: usize,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            PlacesError::Configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        let rate = NonZeroU32::new(max_requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate))),
            max_photos,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        Self::new(
            config.google_places_api_key.clone(),
            config.google_places_base_url.clone(),
            config.request_timeout(),
            config.max_requests_per_second,
            config.max_photos_per_entity,
        )
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn require_api_key(&self) -> Result<(), PlacesError> {
        if self.has_api_key() {
            Ok(())
        } else {
            Err(PlacesError::Configuration(
                "Google Places API key not configured".to_string(),
            ))
        }
    }

    /// Free-text place search
    /// DOCUMENTATION: `OK` and `ZERO_RESULTS` are successes; quota and
    /// request errors are mapped onto PlacesError
    pub async fn text_search(&self, query: &str) -> Result<GoogleTextSearchResponse, PlacesError> {
        self.require_api_key()?;

        let url = format!("{}/textsearch/json", self.base_url);
        log::debug!("Google Places text search: query={}", query);

        let api_response: GoogleTextSearchResponse = self
            .get_json(&url, &[("query", query), ("key", self.api_key.as_str())])
            .await?;

        check_status(&api_response.status, api_response.error_message.as_deref())?;
        log::info!(
            "Google Places search '{}' returned {} results",
            query,
            api_response.results.len()
        );
        Ok(api_response)
    }

    /// Get detailed information about a specific place
    /// DOCUMENTATION: `fields` defaults to DEFAULT_DETAILS_FIELDS
    pub async fn place_details(
        &self,
        place_id: &str,
        fields: Option<&str>,
    ) -> Result<GooglePlaceDetailsResponse, PlacesError> {
        self.require_api_key()?;

        let url = format!("{}/details/json", self.base_url);
        let fields = fields.unwrap_or(DEFAULT_DETAILS_FIELDS);
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let api_response: GooglePlaceDetailsResponse = self
            .get_json(
                &url,
                &[
                    ("place_id", place_id),
                    ("fields", fields),
                    ("key", self.api_key.as_str()),
                ],
            )
            .await?;

        if matches!(api_response.status.as_str(), "NOT_FOUND" | "ZERO_RESULTS") {
            return Err(PlacesError::NotFound(place_id.to_string()));
        }
        check_status(&api_response.status, api_response.error_message.as_deref())?;
        Ok(api_response)
    }

    /// Details of the best text-search match for a query
    pub async fn place_details_for_query(
        &self,
        query: &str,
        fields: Option<&str>,
    ) -> Result<GooglePlaceDetailsResponse, PlacesError> {
        let search = self.text_search(query).await?;
        let top = search
            .results
            .first()
            .ok_or_else(|| PlacesError::NotFound(query.to_string()))?;
        self.place_details(&top.place_id, fields).await
    }

    /// Photo references for a free-text query
    /// DOCUMENTATION: search -> details chain on the top match. Falls back
    /// to the photos carried by the search hit when details have none.
    /// Empty when nothing matched.
    pub async fn photo_references_for_query(&self, query: &str) -> Result<Vec<String>, PlacesError> {
        let search = self.text_search(query).await?;
        let Some(top) = search.results.first() else {
            return Ok(Vec::new());
        };

        let mut references = match self.place_details(&top.place_id, Some("photos")).await {
            Ok(details) => details
                .result
                .map(|place| place.photo_references())
                .unwrap_or_default(),
            Err(PlacesError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        if references.is_empty() {
            references = top.photo_references();
        }
        references.truncate(self.max_photos);
        Ok(references)
    }

    /// Get provider photo URL from photo reference
    /// DOCUMENTATION: Contains the API key, so it must only be used as a
    /// server-side redirect target, never handed out as data
    pub fn photo_media_url(&self, photo_reference: &str, max_width: u32) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("maxwidth", &max_width.to_string())
            .append_pair("photo_reference", photo_reference)
            .append_pair("key", &self.api_key)
            .finish();
        format!("{}/photo?{}", self.base_url, query)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Google Places API request failed: {}", e);
                PlacesError::ExternalApiError(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Places API error {}: {}", status, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            PlacesError::MalformedResponse(e.to_string())
        })
    }
}

/// Check the provider's in-body status
fn check_status(status: &str, error_message: Option<&str>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "OVER_QUERY_LIMIT" => {
            log::error!("Google Places API quota exceeded");
            Err(PlacesError::RateLimitExceeded)
        }
        "REQUEST_DENIED" | "INVALID_REQUEST" => {
            let msg = error_message.unwrap_or("Unknown error").to_string();
            log::error!("Google Places API request denied: {}", msg);
            Err(PlacesError::ExternalApiError(msg))
        }
        other => {
            let msg = error_message
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google Places API unexpected status: {}", msg);
            Err(PlacesError::ExternalApiError(msg))
        }
    }
}

#[async_trait]
impl PlacesGateway for GooglePlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let response = self.text_search(query).await?;
        Ok(response
            .results
            .iter()
            .filter(|place| !place.place_id.is_empty())
            .map(PlaceCandidate::from)
            .collect())
    }

    async fn photo_references(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        match self.place_details(place_id, Some("photos")).await {
            Ok(details) => Ok(details
                .result
                .map(|place| place.photo_references())
                .unwrap_or_default()),
            Err(PlacesError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::matchers::{all_of, contains, request, url_decoded};
    use httptest::responders::{json_encoded, status_code};
    use httptest::{Expectation, Server};
    use serde_json::json;

    fn client_for(server: &Server, api_key: &str) -> GooglePlacesClient {
        GooglePlacesClient::new(
            api_key.to_string(),
            server.url_str("/"),
            Duration::from_secs(5),
            100,
            20,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_text_search_parses_results() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method("GET"),
                request::path("/textsearch/json"),
                request::query(url_decoded(contains(("query", "Pera Palace Istanbul hotel")))),
                request::query(url_decoded(contains(("key", "test_key")))),
            ])
            .respond_with(json_encoded(json!({
                "status": "OK",
                "results": [
                    { "place_id": "ChIJ1", "name": "Pera Palace", "photos": [{ "photo_reference": "r1" }] },
                    { "place_id": "ChIJ2", "name": "Pera Palas Annex" }
                ]
            }))),
        );

        let client = client_for(&server, "test_key");
        let response = client.text_search("Pera Palace Istanbul hotel").await.unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].photo_references(), vec!["r1"]);
        assert!(response.results[1].photo_references().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let server = Server::run();
        let client = client_for(&server, "");

        let err = client.text_search("anything").await.unwrap_err();
        assert!(matches!(err, PlacesError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_quota_status_maps_to_rate_limit() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json")).respond_with(json_encoded(
                json!({ "status": "OVER_QUERY_LIMIT", "results": [] }),
            )),
        );

        let client = client_for(&server, "test_key");
        let err = client.text_search("x").await.unwrap_err();
        assert!(matches!(err, PlacesError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_non_2xx_is_external_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json"))
                .respond_with(status_code(503)),
        );

        let client = client_for(&server, "test_key");
        let err = client.text_search("x").await.unwrap_err();
        assert!(matches!(err, PlacesError::ExternalApiError(_)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json"))
                .respond_with(status_code(200).body("not json")),
        );

        let client = client_for(&server, "test_key");
        let err = client.text_search("x").await.unwrap_err();
        assert!(matches!(err, PlacesError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_photo_chain_prefers_details() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json")).respond_with(json_encoded(
                json!({
                    "status": "OK",
                    "results": [{ "place_id": "ChIJ1", "photos": [{ "photo_reference": "search-ref" }] }]
                }),
            )),
        );
        server.expect(
            Expectation::matching(all_of![
                request::path("/details/json"),
                request::query(url_decoded(contains(("place_id", "ChIJ1")))),
                request::query(url_decoded(contains(("fields", "photos")))),
            ])
            .respond_with(json_encoded(json!({
                "status": "OK",
                "result": { "photos": [{ "photo_reference": "d1" }, { "photo_reference": "d2" }] }
            }))),
        );

        let client = client_for(&server, "test_key");
        let refs = client.photo_references_for_query("Galata Tower").await.unwrap();
        assert_eq!(refs, vec!["d1", "d2"]);
    }

    #[tokio::test]
    async fn test_photo_chain_falls_back_to_search_photos() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json")).respond_with(json_encoded(
                json!({
                    "status": "OK",
                    "results": [{ "place_id": "ChIJ1", "photos": [{ "photo_reference": "search-ref" }] }]
                }),
            )),
        );
        server.expect(
            Expectation::matching(request::path("/details/json"))
                .respond_with(json_encoded(json!({ "status": "OK", "result": {} }))),
        );

        let client = client_for(&server, "test_key");
        let refs = client.photo_references_for_query("Galata Tower").await.unwrap();
        assert_eq!(refs, vec!["search-ref"]);
    }

    #[tokio::test]
    async fn test_photo_chain_no_match() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/textsearch/json"))
                .respond_with(json_encoded(json!({ "status": "ZERO_RESULTS", "results": [] }))),
        );

        let client = client_for(&server, "test_key");
        assert!(client.photo_references_for_query("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_details_not_found_is_empty() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/details/json"))
                .respond_with(json_encoded(json!({ "status": "NOT_FOUND" }))),
        );

        let client = client_for(&server, "test_key");
        let refs = PlacesGateway::photo_references(&client, "gone").await.unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_photo_media_url() {
        let client = GooglePlacesClient::new(
            "secret".to_string(),
            "https://maps.googleapis.com/maps/api/place/".to_string(),
            Duration::from_secs(5),
            10,
            20,
        )
        .unwrap();

        assert_eq!(
            client.photo_media_url("ref+1", 800),
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=800&photo_reference=ref%2B1&key=secret"
        );
    }
}
