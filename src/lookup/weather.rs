use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use super::{WeatherLookup, fetch_bytes, http_client};
use crate::config::WeatherConfig;
use crate::error::LookupError;

/// WeatherAPI.com current conditions client
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
}

impl WeatherApiClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: http_client(config.timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The city query goes in verbatim: it is already a `+`-joined token.
    fn current_url(&self, city_query: &str, api_key: &str) -> String {
        format!(
            "{}/v1/current.json?key={}&q={}",
            self.base_url,
            urlencoding::encode(api_key),
            city_query
        )
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    #[instrument(skip(self, api_key))]
    async fn lookup(&self, city_query: &str, api_key: &str) -> Result<Vec<u8>, LookupError> {
        info!("Fetching current weather");
        fetch_bytes(
            &self.client,
            &self.current_url(city_query, api_key),
            LookupError::CityNotFound,
        )
        .await
    }
}
