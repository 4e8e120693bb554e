use crate::{
    Config,
    model::{CurrentWeather, GeoMatch, RawSample},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Failure modes of an upstream weather provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider explicitly reported that the location does not exist.
    #[error("City not found: {0}")]
    LocationNotFound(String),

    /// Any other non-2xx response.
    #[error("Weather API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// Transport failure or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Server error: {0}")]
    Decode(String),
}

/// Upstream source of raw weather data.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a location.
    async fn fetch_weather(&self, location: &str) -> Result<CurrentWeather, ProviderError>;

    /// 3-hourly forecast series, chronological, up to 40 samples.
    async fn fetch_forecast(&self, location: &str) -> Result<Vec<RawSample>, ProviderError>;

    /// Geocoding matches for a free-text query.
    async fn geocode(&self, query: &str) -> Result<Vec<GeoMatch>, ProviderError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeather.\n\
                 Hint: run `weather-server configure` or set WEATHER_API_KEY."
        )
    })?;

    let provider =
        OpenWeatherProvider::new(api_key.to_owned(), config.base_url(), config.request_timeout())?;

    Ok(Box::new(provider))
}
