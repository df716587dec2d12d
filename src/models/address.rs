//! Address payload from the postal code service

use serde::{Deserialize, Serialize};

/// Response of `GET /api/cep/v1/{cep}`. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressLookupResult {
    #[serde(rename = "cep")]
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub service: String,
}

impl AddressLookupResult {
    #[must_use]
    pub fn has_city(&self) -> bool {
        !self.city.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_payload() {
        let body = r#"{"cep":"01310100","state":"SP","city":"São Paulo",
            "neighborhood":"Bela Vista","street":"Avenida Paulista","service":"open-cep"}"#;
        let parsed: AddressLookupResult = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.postal_code, "01310100");
        assert_eq!(parsed.city, "São Paulo");
        assert!(parsed.has_city());
    }

    #[test]
    fn test_decode_without_city() {
        let parsed: AddressLookupResult = serde_json::from_str(r#"{"cep":"01310100"}"#).unwrap();
        assert!(!parsed.has_city());

        let parsed: AddressLookupResult = serde_json::from_str(r#"{"city":"   "}"#).unwrap();
        assert!(!parsed.has_city());
    }

    #[test]
    fn test_malformed_payload() {
        assert!(serde_json::from_str::<AddressLookupResult>("<html>").is_err());
        assert!(serde_json::from_str::<AddressLookupResult>(r#"{"city": 42}"#).is_err());
    }
}
