//! Request orchestration: validate parameters, make the single upstream call,
//! and shape the result.

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::{
    cities::{disambiguate, is_searchable},
    digest::build_daily_digest,
    error::ServiceError,
    history::{HistoryRecord, HistoryStore},
    hourly::build_hourly_schedule,
    model::{CitySuggestion, CurrentWeather, DailyDigestEntry, HourlySlot},
    provider::WeatherProvider,
};

/// City used by the current-weather and daily-forecast requests when none is given.
pub const DEFAULT_CITY: &str = "London";

/// How many history records a listing returns.
pub const HISTORY_PAGE: usize = 10;

const MISSING_CITY_OR_DATE: &str = "City and date parameters are required";

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    history: Arc<dyn HistoryStore>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>, history: Arc<dyn HistoryStore>) -> Self {
        Self { provider, history }
    }

    /// Current conditions. A successful lookup is also written to the
    /// history store; failing to do so is logged and does not fail the request.
    pub async fn current_weather(
        &self,
        city: Option<&str>,
    ) -> Result<CurrentWeather, ServiceError> {
        let city = non_blank(city).unwrap_or(DEFAULT_CITY);
        let current = self.provider.fetch_weather(city).await?;

        if let Err(e) = self
            .history
            .record(city, current.sample.temperature, &current.sample.condition_text)
            .await
        {
            tracing::warn!(error = %e, city, "failed to record weather history");
        }

        Ok(current)
    }

    pub async fn daily_forecast(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<DailyDigestEntry>, ServiceError> {
        let city = non_blank(city).unwrap_or(DEFAULT_CITY);
        let samples = self.provider.fetch_forecast(city).await?;

        Ok(build_daily_digest(&samples))
    }

    pub async fn hourly_forecast(
        &self,
        city: Option<&str>,
        date: Option<&str>,
    ) -> Result<Vec<HourlySlot>, ServiceError> {
        self.hourly_forecast_on(city, date, Local::now().date_naive()).await
    }

    /// Like [`Self::hourly_forecast`], with an explicit notion of today.
    pub async fn hourly_forecast_on(
        &self,
        city: Option<&str>,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<HourlySlot>, ServiceError> {
        let (Some(city), Some(date)) = (non_blank(city), non_blank(date)) else {
            return Err(ServiceError::MissingParameter(MISSING_CITY_OR_DATE));
        };
        let requested = parse_request_date(date)?;

        let samples = self.provider.fetch_forecast(city).await?;
        let slots = build_hourly_schedule(&samples, requested, today, &mut rand::thread_rng())?;

        Ok(slots.into())
    }

    /// Suggestions for a partially typed city name. Short queries return an
    /// empty list without calling the provider.
    pub async fn city_search(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<CitySuggestion>, ServiceError> {
        let query = query.unwrap_or_default();
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let matches = self.provider.geocode(query.trim()).await?;
        Ok(disambiguate(&matches))
    }

    pub async fn history(&self) -> Result<Vec<HistoryRecord>, ServiceError> {
        Ok(self.history.recent(HISTORY_PAGE).await?)
    }

    pub async fn delete_history(&self, id: u64) -> Result<(), ServiceError> {
        if self.history.delete(id).await? {
            Ok(())
        } else {
            Err(ServiceError::HistoryNotFound(id))
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Strict `YYYY-MM-DD`. chrono's `%Y` also accepts signed and extended years,
/// which are rejected here.
fn parse_request_date(date: &str) -> Result<NaiveDate, ServiceError> {
    let invalid = || ServiceError::InvalidDate(date.to_string());

    if date.len() != 10 || !date.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}
