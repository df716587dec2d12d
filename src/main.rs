use std::sync::Arc;

use anyhow::Result;
use cep_weather::{BrasilApiClient, CepWeatherConfig, WeatherApiClient, WeatherService, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = CepWeatherConfig::load()?;
    telemetry::init(&config.logging)?;

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::info!("No .env file loaded: {}", e),
    }

    if config.weather.api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; weather lookups will be rejected upstream");
    }

    let postal = BrasilApiClient::new(&config.postal)?;
    let weather = WeatherApiClient::new(&config.weather)?;
    let service = WeatherService::new(
        Arc::new(postal),
        Arc::new(weather),
        config.weather.api_key_or_empty(),
    );

    web::run(Arc::new(service), &config.server).await
}
