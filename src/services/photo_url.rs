// src/services/photo_url.rs
// DOCUMENTATION: Photo URL builder
// PURPOSE: Turn provider photo references into URLs served by our redirect route,
// keeping the provider API key on the server

use url::form_urlencoded;

/// Build the redirect URL for a photo reference
/// DOCUMENTATION: Pure string construction, no network call.
/// `proxy_path` is either a path ("/api/places/photo") or an absolute URL.
pub fn build_url(proxy_path: &str, photo_reference: &str, max_width: u32) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("photoReference", photo_reference)
        .append_pair("maxwidth", &max_width.to_string())
        .finish();

    let separator = if proxy_path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", proxy_path, separator, query)
}
