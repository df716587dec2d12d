//! Current weather payload from the weather service and unit conversion

use serde::{Deserialize, Serialize};

/// Offset added to Celsius to get the displayed Kelvin value.
///
/// Whole degrees: the page shows `298.0 K` for `25.0 °C`.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Convert temperature from Celsius to Kelvin
#[must_use]
pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

/// Format a temperature with one decimal place
#[must_use]
pub fn format_temperature(value: f64) -> String {
    format!("{value:.1}")
}

/// Response of `GET /v1/current.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default)]
    pub location: WeatherLocation,
    pub current: CurrentWeather,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

/// Current conditions; only the two temperatures are mandatory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Temperature in Fahrenheit
    pub temp_f: f64,
    #[serde(default)]
    pub last_updated_epoch: i64,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub is_day: u8,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_degree: u16,
    #[serde(default)]
    pub wind_dir: String,
    #[serde(default)]
    pub pressure_mb: f64,
    #[serde(default)]
    pub precip_mm: f64,
    #[serde(default)]
    pub humidity: u8,
    #[serde(default)]
    pub cloud: u8,
    #[serde(default)]
    pub feelslike_c: f64,
    #[serde(default)]
    pub vis_km: f64,
    #[serde(default)]
    pub uv: f64,
    #[serde(default)]
    pub gust_kph: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}
