use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use super::{PostalLookup, fetch_bytes, http_client};
use crate::config::PostalConfig;
use crate::error::LookupError;

/// BrasilAPI CEP client
pub struct BrasilApiClient {
    client: Client,
    base_url: String,
}

impl BrasilApiClient {
    /// Create a new client
    pub fn new(config: &PostalConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: http_client(config.timeout())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for one postal code. The code is not validated, only escaped as
    /// a path segment. `.` and `..` have no URL: URL parsing resolves them
    /// as dot segments whatever the escaping.
    fn lookup_url(&self, postal_code: &str) -> Option<String> {
        if matches!(postal_code, "." | "..") {
            return None;
        }
        Some(format!(
            "{}/api/cep/v1/{}",
            self.base_url,
            urlencoding::encode(postal_code)
        ))
    }
}

#[async_trait]
impl PostalLookup for BrasilApiClient {
    #[instrument(skip(self))]
    async fn lookup(&self, postal_code: &str) -> Result<Vec<u8>, LookupError> {
        info!("Looking up postal code");
        let Some(url) = self.lookup_url(postal_code) else {
            warn!("Postal code is a dot segment, not sending it");
            return Err(LookupError::PostalCodeNotFound);
        };
        fetch_bytes(&self.client, &url, LookupError::PostalCodeNotFound).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> BrasilApiClient {
        BrasilApiClient::new(&PostalConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_lookup_url() {
        let client = client_for("https://brasilapi.com.br/");
        assert_eq!(
            client.lookup_url("01310-100").as_deref(),
            Some("https://brasilapi.com.br/api/cep/v1/01310-100")
        );
        assert_eq!(
            client.lookup_url("01/31").as_deref(),
            Some("https://brasilapi.com.br/api/cep/v1/01%2F31")
        );
        assert_eq!(
            client.lookup_url("%2e%2e").as_deref(),
            Some("https://brasilapi.com.br/api/cep/v1/%252e%252e")
        );
        assert_eq!(client.lookup_url(".."), None);
        assert_eq!(client.lookup_url("."), None);
    }

    #[tokio::test]
    async fn test_dot_segments_are_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        for postal_code in ["..", "."] {
            let result = client.lookup(postal_code).await;
            assert_eq!(result, Err(LookupError::PostalCodeNotFound));
        }
    }

    #[tokio::test]
    async fn test_success_returns_raw_body() {
        let server = MockServer::start().await;
        let body = r#"{"cep":"01310100","city":"São Paulo"}"#;
        Mock::given(method("GET"))
            .and(path("/api/cep/v1/01310100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = client_for(&server.uri()).lookup("01310100").await.unwrap();
        assert_eq!(bytes, body.as_bytes());
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"message":"CEP não encontrado"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).lookup("00000000").await.unwrap_err();
        assert_eq!(err, LookupError::PostalCodeNotFound);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let err = client_for("http://127.0.0.1:1")
            .lookup("01310100")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = BrasilApiClient::new(&PostalConfig {
            base_url: server.uri(),
            timeout_seconds: 1,
        })
        .unwrap();
        let err = client.lookup("01310100").await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)));
    }
}
