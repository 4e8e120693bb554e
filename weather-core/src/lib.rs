//! Core library for the weather proxy server.
//!
//! This crate defines:
//! - The provider abstraction and its OpenWeatherMap implementation
//! - Forecast reshaping: daily digest and the fixed-cadence hourly schedule
//! - City-name disambiguation for geocoding suggestions
//! - Query history, configuration, and the request-level service
//!
//! It is used by `weather-server`, but the builders in [`digest`], [`hourly`]
//! and [`cities`] are pure and can be reused on their own.

pub mod cities;
pub mod config;
pub mod digest;
pub mod error;
pub mod history;
pub mod hourly;
pub mod model;
pub mod provider;
pub mod random;
pub mod service;
pub mod timefmt;

pub use cities::disambiguate;
pub use config::Config;
pub use digest::build_daily_digest;
pub use error::ServiceError;
pub use history::{HistoryRecord, HistoryStore, InMemoryHistory};
pub use hourly::{ScheduleError, build_hourly_schedule};
pub use model::{
    CitySuggestion, CurrentWeather, DailyDigestEntry, GeoMatch, HourlySlot, RawSample,
};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
pub use random::RandomSource;
pub use service::WeatherService;
