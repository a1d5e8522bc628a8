use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::aqi::{AqiError, AqiResult, PollutantReading};
use crate::error::Error;
use crate::location::{compose_query, LocationCandidate, LocationError, LocationResolver};
use crate::measurement::MeasurementError;
use crate::report::AqiReport;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

pub(super) fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Location(LocationError::NoInput)
        | Error::Location(LocationError::InvalidCoordinates { .. }) => StatusCode::BAD_REQUEST,
        Error::Location(LocationError::NotFound(_))
        | Error::Measurement(MeasurementError::NoData { .. }) => StatusCode::NOT_FOUND,
        Error::Location(LocationError::MissingApiKey)
        | Error::Measurement(MeasurementError::MissingApiKey) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Location(LocationError::Network(_))
        | Error::Location(LocationError::InvalidResponse(_))
        | Error::Measurement(MeasurementError::Network(_))
        | Error::Measurement(MeasurementError::InvalidResponse(_)) => StatusCode::BAD_GATEWAY,
        Error::Aqi(AqiError::InvalidInput { .. }) | Error::Aqi(AqiError::InsufficientData) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            warn!(error = %err, "upstream failure");
        }
        ApiError(status, err.to_string())
    }
}

/// Run blocking provider work off the async executor.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Worker failed: {}", e)))?
        .map_err(ApiError::from)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── GET /api/search ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<LocationCandidate>>, ApiError> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default();

    let q = query.clone();
    let candidates = run_blocking(move || state.search(&q)).await?;

    info!(query = %query, count = candidates.len(), ms = elapsed_ms(start), "GET /api/search");
    Ok(Json(candidates))
}

// ─── GET /api/aqi ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AqiQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

pub async fn aqi(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AqiQuery>,
) -> Result<Json<AqiReport>, ApiError> {
    let start = Instant::now();

    let report = run_blocking(move || {
        let location = match (&params.city, params.lat, params.lon) {
            (Some(city), _, _) => {
                let query = compose_query(city, params.state.as_deref(), params.country.as_deref());
                state.resolve(&query)?
            }
            (None, Some(lat), Some(lon)) => LocationResolver::from_manual(lat, lon)?,
            _ => return Err(LocationError::NoInput.into()),
        };
        state.assess(&location)
    })
    .await?;

    info!(
        aqi = report.result.aqi,
        dominant = %report.result.dominant,
        ms = elapsed_ms(start),
        "GET /api/aqi"
    );
    Ok(Json(report))
}

// ─── POST /api/compute ───────────────────────────────────────────

pub async fn compute(
    State(state): State<Arc<AppState>>,
    Json(reading): Json<PollutantReading>,
) -> Result<Json<AqiResult>, ApiError> {
    let result = state.engine.compute(&reading).map_err(Error::from)?;
    info!(aqi = result.aqi, pollutants = reading.len(), "POST /api/compute");
    Ok(Json(result))
}
