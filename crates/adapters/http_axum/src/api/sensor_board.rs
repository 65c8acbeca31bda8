//! Settings polled by the sensor board, and the operator controls for them.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::board::SensorBoardSettings;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub monitoring: bool,
    pub encryption_enabled: bool,
    pub upload_interval: i64,
}

impl From<SensorBoardSettings> for SettingsView {
    fn from(settings: SensorBoardSettings) -> Self {
        Self {
            monitoring: settings.monitoring,
            encryption_enabled: settings.encryption_enabled,
            upload_interval: settings.upload_interval_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadIntervalRequest {
    pub upload_interval: i64,
}

#[derive(Debug, Deserialize)]
pub struct MonitoringRequest {
    pub monitoring: bool,
}

#[derive(Debug, Deserialize)]
pub struct EncryptionRequest {
    pub encryption_enabled: bool,
}

/// `GET /api/sensor-board/commands`
pub async fn commands<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<SettingsView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let settings = state.board.settings().await?;
    Ok(Json(settings.into()))
}

/// `PUT /api/sensor-board/upload-interval`: clamped into `[1000, 10000]` ms.
pub async fn set_upload_interval<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<UploadIntervalRequest>,
) -> Result<Json<SettingsView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let settings = state.board.set_upload_interval(req.upload_interval).await?;
    Ok(Json(settings.into()))
}

/// `PUT /api/sensor-board/monitoring`
pub async fn set_monitoring<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<MonitoringRequest>,
) -> Result<Json<SettingsView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let settings = state.board.set_monitoring(req.monitoring).await?;
    Ok(Json(settings.into()))
}

/// `PUT /api/sensor-board/encryption`
pub async fn set_encryption<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<EncryptionRequest>,
) -> Result<Json<SettingsView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let settings = state.board.set_encryption(req.encryption_enabled).await?;
    Ok(Json(settings.into()))
}
