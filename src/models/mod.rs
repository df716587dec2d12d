//! Data models for the CEP weather service
//!
//! - Address: payload of the postal code service
//! - Weather: payload of the weather service and temperature conversion
//! - Page: values rendered for one form submission

pub mod address;
pub mod page;
pub mod weather;

// Re-export all public types for convenient access
pub use address::AddressLookupResult;
pub use page::PageData;
pub use weather::{WeatherResult, celsius_to_kelvin, format_temperature};
