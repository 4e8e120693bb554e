use chrono::NaiveDate;
use thiserror::Error;

use crate::{history::HistoryError, hourly::ScheduleError, provider::ProviderError};

/// Everything a request can fail with. Each variant is terminal for the
/// request and maps to one HTTP status.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingParameter(&'static str),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("City not found: {0}")]
    LocationNotFound(String),

    #[error("Weather API error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Decode(String),

    #[error("No hourly forecast data available for {0}")]
    NotAvailable(NaiveDate),

    #[error("History item {0} not found")]
    HistoryNotFound(u64),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl ServiceError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::MissingParameter(_) | ServiceError::InvalidDate(_) => 400,
            ServiceError::LocationNotFound(_)
            | ServiceError::NotAvailable(_)
            | ServiceError::HistoryNotFound(_) => 404,
            ServiceError::Upstream { status, .. } => *status,
            ServiceError::Network(_) | ServiceError::Decode(_) | ServiceError::History(_) => 500,
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::LocationNotFound(city) => ServiceError::LocationNotFound(city),
            ProviderError::Upstream { status, message } => {
                ServiceError::Upstream { status, message }
            }
            ProviderError::Network(cause) => ServiceError::Network(cause),
            ProviderError::Decode(cause) => ServiceError::Decode(cause),
        }
    }
}

impl From<ScheduleError> for ServiceError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::NotAvailable(date) => ServiceError::NotAvailable(date),
            ScheduleError::OutOfRange(date) => ServiceError::InvalidDate(date.to_string()),
        }
    }
}
