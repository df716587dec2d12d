//! `cep-weather` - current temperature for a Brazilian postal code
//!
//! A single-page web form: the submitted CEP is resolved to a city through
//! BrasilAPI, and the current temperature for that city is fetched from
//! WeatherAPI.com and shown in Celsius, Fahrenheit and Kelvin.

pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod service;
pub mod telemetry;
pub mod web;

// Re-export core types for public API
pub use config::CepWeatherConfig;
pub use error::{CepWeatherError, LookupError};
pub use lookup::{BrasilApiClient, PostalLookup, WeatherApiClient, WeatherLookup};
pub use models::{AddressLookupResult, PageData, WeatherResult};
pub use service::{LookupForm, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CepWeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
