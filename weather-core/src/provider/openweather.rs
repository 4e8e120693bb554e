use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    model::{CurrentWeather, GeoMatch, RawSample},
    timefmt,
};

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// 5 days of 3-hour slots.
const FORECAST_SLOTS: &str = "40";
const GEOCODE_LIMIT: &str = "10";
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { api_key, base_url, http })
    }

    /// GET `path` and return the body of a 2xx response.
    ///
    /// `location` is set for lookups by city name, so that a 404 can be
    /// reported as an unknown city.
    async fn get_body(
        &self,
        path: &str,
        params: &[(&str, &str)],
        location: Option<&str>,
    ) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(classify_failure(status.as_u16(), &body, location));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    #[serde(default)]
    pressure: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

/// Error payload, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, location: &str) -> Result<CurrentWeather, ProviderError> {
        let body = self
            .get_body(
                "/data/2.5/weather",
                &[("q", location), ("units", "metric")],
                Some(location),
            )
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Decode(format!("Failed to parse OpenWeather current JSON: {e}"))
        })?;

        let timestamp = DateTime::from_timestamp(parsed.dt, 0)
            .unwrap_or_else(Utc::now)
            .naive_utc();
        let (condition_text, condition_icon) = condition(&parsed.weather);

        Ok(CurrentWeather {
            name: parsed.name,
            sample: RawSample {
                timestamp,
                temperature: parsed.main.temp,
                condition_text,
                condition_icon,
                humidity: parsed.main.humidity,
                wind_speed: parsed.wind.speed,
                pressure: None,
            },
        })
    }

    async fn fetch_forecast(&self, location: &str) -> Result<Vec<RawSample>, ProviderError> {
        let body = self
            .get_body(
                "/data/2.5/forecast",
                &[("q", location), ("units", "metric"), ("cnt", FORECAST_SLOTS)],
                Some(location),
            )
            .await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Decode(format!("Failed to parse OpenWeather forecast JSON: {e}"))
        })?;

        tracing::debug!(location, samples = parsed.list.len(), "OpenWeather forecast received");

        parsed.list.into_iter().map(forecast_sample).collect()
    }

    async fn geocode(&self, query: &str) -> Result<Vec<GeoMatch>, ProviderError> {
        let body = self
            .get_body("/geo/1.0/direct", &[("q", query), ("limit", GEOCODE_LIMIT)], None)
            .await?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::Decode(format!("Failed to parse OpenWeather geocoding JSON: {e}"))
        })
    }
}

fn forecast_sample(entry: OwForecastEntry) -> Result<RawSample, ProviderError> {
    let timestamp = timefmt::parse(&entry.dt_txt).map_err(|e| {
        ProviderError::Decode(format!("Invalid forecast timestamp '{}': {e}", entry.dt_txt))
    })?;
    let (condition_text, condition_icon) = condition(&entry.weather);

    Ok(RawSample {
        timestamp,
        temperature: entry.main.temp,
        condition_text,
        condition_icon,
        humidity: entry.main.humidity,
        wind_speed: entry.wind.speed,
        pressure: entry.main.pressure,
    })
}

fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

/// Upstream's own error message, if the body is a JSON error payload.
fn upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorBody>(body).ok().and_then(|b| b.message)
}

fn classify_failure(status: u16, body: &str, location: Option<&str>) -> ProviderError {
    let message = upstream_message(body);
    let city_not_found =
        status == 404 && message.as_deref().is_some_and(|m| m.contains("city not found"));

    match location {
        Some(location) if city_not_found => ProviderError::LocationNotFound(location.to_string()),
        _ => ProviderError::Upstream {
            status,
            message: message.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
