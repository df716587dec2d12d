//! Outbound lookups
//!
//! Both upstream services are called the same way: one GET, success status
//! required, body returned undecoded. The traits are the seams the request
//! service depends on, so tests can swap in canned responses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::LookupError;

pub mod postal;
pub mod weather;

pub use postal::BrasilApiClient;
pub use weather::WeatherApiClient;

/// Resolves a postal code to the raw address payload
#[async_trait]
pub trait PostalLookup: Send + Sync {
    async fn lookup(&self, postal_code: &str) -> Result<Vec<u8>, LookupError>;
}

/// Fetches the raw current-weather payload for a sanitized city query
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn lookup(&self, city_query: &str, api_key: &str) -> Result<Vec<u8>, LookupError>;
}

/// Build the HTTP client shared by one lookup service
pub(crate) fn http_client(timeout: Duration) -> Result<Client, LookupError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LookupError::Network(format!("Failed to create HTTP client: {e}")))
}

/// GET `url` and return the body of a success response.
///
/// A non-success status maps to `rejected`, and its body is discarded.
pub(crate) async fn fetch_bytes(
    client: &Client,
    url: &str,
    rejected: LookupError,
) -> Result<Vec<u8>, LookupError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| {
            LookupError::Network(format!("API request failed: {}", e.without_url()))
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Upstream rejected request with status {}", status);
        return Err(rejected);
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| {
            LookupError::Network(format!("Failed to read response body: {}", e.without_url()))
        })?;

    debug!("Upstream answered {} with {} bytes", status, body.len());
    Ok(body.to_vec())
}
