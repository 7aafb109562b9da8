// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GOOGLE_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const DEFAULT_PHOTO_PROXY_PATH: &str = "/api/places/photo";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8003)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Places API Key (never leaves the server)
    pub google_places_api_key: String,

    /// Base URL of the Google Places web service
    pub google_places_base_url: String,

    /// When set, enrichment goes through the /api/places/* routes of this host
    pub places_gateway_url: Option<String>,

    /// Path (or absolute URL) of the photo redirect route
    pub photo_proxy_path: String,

    /// Width requested for proxied photos
    pub photo_max_width: u32,

    /// Valid photo count at which an entity is left alone
    pub sufficiency_threshold: usize,

    /// Maximum photo references kept per entity
    pub max_photos_per_entity: usize,

    /// Per network call timeout in seconds
    pub request_timeout_secs: u64,

    /// Outbound provider requests per second
    pub max_requests_per_second: u32,

    /// Photo cache TTL in seconds; None keeps entries for the process lifetime
    pub photo_cache_ttl_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_address: "127.0.0.1".to_string(),
            server_port: 8003,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            google_places_api_key: String::new(),
            google_places_base_url: DEFAULT_GOOGLE_PLACES_BASE_URL.to_string(),
            places_gateway_url: None,
            photo_proxy_path: DEFAULT_PHOTO_PROXY_PATH.to_string(),
            photo_max_width: 800,
            sufficiency_threshold: 6,
            max_photos_per_entity: 20,
            request_timeout_secs: 8,
            max_requests_per_second: 10,
            photo_cache_ttl_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    /// DOCUMENTATION: Unset or unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Config {
            server_address: non_empty("SERVER_ADDRESS").unwrap_or(defaults.server_address),

            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port),

            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),

            // The public-prefixed name is what the web frontend historically used
            google_places_api_key: non_empty("GOOGLE_PLACES_API_KEY")
                .or_else(|| non_empty("NEXT_PUBLIC_GOOGLE_PLACES_API_KEY"))
                .unwrap_or_default(),

            google_places_base_url: non_empty("GOOGLE_PLACES_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.google_places_base_url),

            places_gateway_url: non_empty("PLACES_GATEWAY_URL")
                .map(|url| url.trim_end_matches('/').to_string()),

            photo_proxy_path: non_empty("PHOTO_PROXY_PATH").unwrap_or(defaults.photo_proxy_path),

            photo_max_width: parse_or(&lookup, "PHOTO_MAX_WIDTH", defaults.photo_max_width),

            sufficiency_threshold: parse_or(
                &lookup,
                "SUFFICIENCY_THRESHOLD",
                defaults.sufficiency_threshold,
            ),

            max_photos_per_entity: parse_or(
                &lookup,
                "MAX_PHOTOS_PER_ENTITY",
                defaults.max_photos_per_entity,
            ),

            request_timeout_secs: parse_or(
                &lookup,
                "PLACES_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),

            max_requests_per_second: parse_or(
                &lookup,
                "PLACES_MAX_REQUESTS_PER_SECOND",
                defaults.max_requests_per_second,
            ),

            photo_cache_ttl_secs: non_empty("PHOTO_CACHE_TTL_SECS").and_then(|v| v.parse().ok()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.sufficiency_threshold == 0 {
            return Err("SUFFICIENCY_THRESHOLD must be greater than 0".to_string());
        }

        if self.max_photos_per_entity == 0 {
            return Err("MAX_PHOTOS_PER_ENTITY must be greater than 0".to_string());
        }

        if self.photo_max_width == 0 {
            return Err("PHOTO_MAX_WIDTH must be greater than 0".to_string());
        }

        if self.max_requests_per_second == 0 {
            return Err("PLACES_MAX_REQUESTS_PER_SECOND must be greater than 0".to_string());
        }

        if self.google_places_api_key.is_empty() {
            log::warn!("GOOGLE_PLACES_API_KEY not configured - photo lookups will use fallbacks");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.server_port, 8003);
        assert_eq!(config.sufficiency_threshold, 6);
        assert_eq!(config.max_photos_per_entity, 20);
        assert_eq!(config.photo_proxy_path, "/api/places/photo");
        assert!(config.places_gateway_url.is_none());
        assert!(config.photo_cache_ttl_secs.is_none());
        assert!(config.google_places_api_key.is_empty());
    }

    #[test]
    fn test_public_key_fallback() {
        let config = config_from(&[("NEXT_PUBLIC_GOOGLE_PLACES_API_KEY", "public-key")]);
        assert_eq!(config.google_places_api_key, "public-key");

        let config = config_from(&[
            ("GOOGLE_PLACES_API_KEY", "server-key"),
            ("NEXT_PUBLIC_GOOGLE_PLACES_API_KEY", "public-key"),
        ]);
        assert_eq!(config.google_places_api_key, "server-key");
    }

    #[test]
    fn test_unparsable_values_use_defaults() {
        let config = config_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("SUFFICIENCY_THRESHOLD", "10"),
            ("PLACES_GATEWAY_URL", "http://localhost:3000/"),
        ]);
        assert_eq!(config.server_port, 8003);
        assert_eq!(config.sufficiency_threshold, 10);
        assert_eq!(
            config.places_gateway_url.as_deref(),
            Some("http://localhost:3000")
        );
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = config_from(&[("SUFFICIENCY_THRESHOLD", "0")]);
        assert!(config.validate().is_err());
        assert!(config_from(&[]).validate().is_ok());
    }
}
