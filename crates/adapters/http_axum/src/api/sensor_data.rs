//! Telemetry uploads from the sensor board and reading history.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::snapshot::SensorSnapshot;
use homeguard_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: u32 = 50;
const MAX_HISTORY_LIMIT: u32 = 1000;

#[derive(Debug, Serialize)]
pub struct IngestBody {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: Timestamp,
}

/// Possible responses from the ingest endpoint.
pub enum IngestResponse {
    Stored(Json<IngestBody>),
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Stored(json) => (StatusCode::OK, json).into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryBody {
    pub history: Vec<SensorSnapshot>,
}

/// `POST /api/sensor-data`: store a reading and run a control cycle.
///
/// Any JSON object is accepted; fields that are missing or cannot be read
/// fall back to inactive values.
pub async fn ingest<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(body): Json<serde_json::Value>,
) -> Result<IngestResponse, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let (snapshot, _) = state.control.ingest(&body).await?;
    Ok(IngestResponse::Stored(Json(IngestBody {
        status: "success",
        message: "Data received and stored",
        timestamp: snapshot.observed_at,
    })))
}

/// `GET /api/sensor-data/history?limit=50`: recent readings, oldest first.
pub async fn history<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let history = state.control.history(limit).await?;
    Ok(Json(HistoryBody { history }))
}
