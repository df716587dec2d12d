//! Form submission pipeline
//!
//! Postal code -> address lookup -> city -> sanitized query -> weather lookup
//! -> temperatures. Every failure ends the pipeline and is reported on the
//! page together with whatever was resolved before it.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::CepWeatherError;
use crate::lookup::{PostalLookup, WeatherLookup};
use crate::models::{
    AddressLookupResult, PageData, WeatherResult, celsius_to_kelvin, format_temperature,
};
use crate::sanitize::sanitize;

/// Fields of the submitted form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupForm {
    /// Postal code, sent as-is to the address service
    #[serde(default)]
    pub cep: String,
}

/// Temperatures of one successful weather lookup
#[derive(Debug, Clone, Copy, PartialEq)]
struct Temperatures {
    celsius: f64,
    fahrenheit: f64,
}

/// Runs the lookup pipeline for each form submission
pub struct WeatherService {
    postal: Arc<dyn PostalLookup>,
    weather: Arc<dyn WeatherLookup>,
    api_key: String,
}

impl WeatherService {
    pub fn new(
        postal: Arc<dyn PostalLookup>,
        weather: Arc<dyn WeatherLookup>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            postal,
            weather,
            api_key: api_key.into(),
        }
    }

    /// Handle one submission. Never fails: errors end up in `PageData::error`.
    #[instrument(skip(self, form), fields(cep = %form.cep))]
    pub async fn handle(&self, form: &LookupForm) -> PageData {
        let mut page = PageData::for_postal_code(form.cep.clone());

        let city = match self.resolve_city(&form.cep).await {
            Ok(city) => city,
            Err(e) => {
                warn!("Postal code lookup failed: {}", e);
                page.error = e.user_message();
                return page;
            }
        };
        page.city = city;

        match self.current_temperatures(&page.city).await {
            Ok(temps) => {
                page.temp_c = format_temperature(temps.celsius);
                page.temp_f = format_temperature(temps.fahrenheit);
                page.temp_k = format_temperature(celsius_to_kelvin(temps.celsius));
                info!(city = %page.city, temp_c = %page.temp_c, "Lookup completed");
            }
            Err(e) => {
                warn!(city = %page.city, "Weather lookup failed: {}", e);
                page.error = e.user_message();
            }
        }

        page
    }

    async fn resolve_city(&self, postal_code: &str) -> Result<String, CepWeatherError> {
        let body = self.postal.lookup(postal_code).await?;

        let address: AddressLookupResult = serde_json::from_slice(&body)
            .map_err(|e| CepWeatherError::invalid_postal_code(e.to_string()))?;

        if !address.has_city() {
            return Err(CepWeatherError::CityMissing);
        }
        Ok(address.city)
    }

    async fn current_temperatures(&self, city: &str) -> Result<Temperatures, CepWeatherError> {
        let query = sanitize(city);
        let body = self.weather.lookup(&query, &self.api_key).await?;

        let weather: WeatherResult = serde_json::from_slice(&body)
            .map_err(|e| CepWeatherError::invalid_city(e.to_string()))?;

        Ok(Temperatures {
            celsius: weather.current.temp_c,
            fahrenheit: weather.current.temp_f,
        })
    }
}
