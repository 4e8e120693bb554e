use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One upstream observation or forecast point, in provider-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    #[serde(rename = "time", with = "crate::timefmt")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde(rename = "description")]
    pub condition_text: String,
    #[serde(rename = "icon")]
    pub condition_icon: String,
    pub humidity: u8,
    #[serde(rename = "wind")]
    pub wind_speed: f64,
    /// Only forecast-mode samples carry pressure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<i32>,
}

impl RawSample {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Current conditions for a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    #[serde(flatten)]
    pub sample: RawSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDigestEntry {
    pub date: NaiveDate,
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde(rename = "description")]
    pub condition_text: String,
    #[serde(rename = "icon")]
    pub condition_icon: String,
    pub humidity: u8,
    #[serde(rename = "wind")]
    pub wind_speed: f64,
}

impl From<&RawSample> for DailyDigestEntry {
    fn from(sample: &RawSample) -> Self {
        Self {
            date: sample.date(),
            temperature: sample.temperature,
            condition_text: sample.condition_text.clone(),
            condition_icon: sample.condition_icon.clone(),
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
        }
    }
}

/// One point of the fixed-cadence hourly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySlot {
    #[serde(rename = "time", with = "crate::timefmt")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "temp")]
    pub temperature: f64,
    #[serde(rename = "description")]
    pub condition_text: String,
    #[serde(rename = "icon")]
    pub condition_icon: String,
    pub humidity: u8,
    #[serde(rename = "wind")]
    pub wind_speed: f64,
    pub pressure: Option<i32>,
}

impl HourlySlot {
    /// Copy a sample's fields onto a canonical timestamp.
    pub fn sourced(timestamp: NaiveDateTime, sample: &RawSample) -> Self {
        Self {
            timestamp,
            temperature: sample.temperature,
            condition_text: sample.condition_text.clone(),
            condition_icon: sample.condition_icon.clone(),
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
            pressure: sample.pressure,
        }
    }
}

/// A single geocoding result as returned by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}
