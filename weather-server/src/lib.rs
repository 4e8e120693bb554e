//! HTTP surface of the weather proxy.
//!
//! Every route is a thin wrapper over [`WeatherService`]; errors are rendered
//! as `{"error": "..."}` with the status the service assigns. Malformed query
//! strings and path segments use the same body.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde::Deserialize;
use tokio::net::TcpListener;
use weather_core::{
    CitySuggestion, Config, CurrentWeather, DailyDigestEntry, HistoryRecord, HourlySlot,
    InMemoryHistory, ServiceError, WeatherService, provider_from_config,
};

pub fn build_app(service: WeatherService) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/weather", get(current_weather))
        .route("/api/forecast", get(daily_forecast))
        .route("/api/hourly-forecast", get(hourly_forecast))
        .route("/api/city-search", get(city_search))
        .route("/api/history", get(history))
        .route("/api/history/:id", delete(delete_history))
        .with_state(service)
}

/// Build the service from config and serve until the process is stopped.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let service = WeatherService::new(Arc::from(provider), Arc::new(InMemoryHistory::new()));
    let app = build_app(service);

    let bind = config.bind();
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {bind}"))?;

    tracing::info!(addr = %bind, "HTTP server listening");
    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}

/// Failure of a request, rendered as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The request could not be extracted (bad query string or path segment).
    Malformed { status: StatusCode, message: String },
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Service(err) => {
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.to_string())
            }
            Self::Malformed { status, message } => (status, message),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %message, status = status.as_u16(), "request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
struct CityQuery {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyQuery {
    city: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn current_weather(
    State(service): State<WeatherService>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> ApiResult<CurrentWeather> {
    let Query(q) = query?;
    Ok(Json(service.current_weather(q.city.as_deref()).await?))
}

async fn daily_forecast(
    State(service): State<WeatherService>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> ApiResult<Vec<DailyDigestEntry>> {
    let Query(q) = query?;
    Ok(Json(service.daily_forecast(q.city.as_deref()).await?))
}

async fn hourly_forecast(
    State(service): State<WeatherService>,
    query: Result<Query<HourlyQuery>, QueryRejection>,
) -> ApiResult<Vec<HourlySlot>> {
    let Query(q) = query?;
    Ok(Json(service.hourly_forecast(q.city.as_deref(), q.date.as_deref()).await?))
}

async fn city_search(
    State(service): State<WeatherService>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<CitySuggestion>> {
    let Query(q) = query?;
    Ok(Json(service.city_search(q.q.as_deref()).await?))
}

async fn history(State(service): State<WeatherService>) -> ApiResult<Vec<HistoryRecord>> {
    Ok(Json(service.history().await?))
}

async fn delete_history(
    State(service): State<WeatherService>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<serde_json::Value> {
    let Path(id) = id?;
    service.delete_history(id).await?;
    Ok(Json(serde_json::json!({ "message": "History item deleted successfully" })))
}
