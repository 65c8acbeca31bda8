//! Per-channel light and buzzer enables.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::toggle::{Actuator, Channel};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ToggleView {
    pub sensor_name: &'static str,
    pub light_enabled: bool,
    pub buzzer_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ListBody {
    pub controls: Vec<ToggleView>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub sensor_name: String,
    /// `"light"` or `"buzzer"`.
    pub control_type: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleBody {
    pub success: bool,
    pub sensor_name: &'static str,
    pub control_type: Actuator,
    pub enabled: bool,
}

/// `GET /api/sensor-controls`: every channel with its effective toggle.
pub async fn list<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<ListBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let toggles = state.control.toggles().await?;
    let controls = toggles
        .iter()
        .map(|(channel, toggle)| ToggleView {
            sensor_name: channel.display_name(),
            light_enabled: toggle.light_enabled,
            buzzer_enabled: toggle.buzzer_enabled,
        })
        .collect();
    Ok(Json(ListBody { controls }))
}

/// `POST /api/sensor-control/toggle`
pub async fn toggle<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let channel: Channel = req.sensor_name.parse()?;
    let actuator: Actuator = req.control_type.parse()?;

    state
        .control
        .set_toggle(channel, actuator, req.enabled)
        .await?;

    Ok(Json(ToggleBody {
        success: true,
        sensor_name: channel.display_name(),
        control_type: actuator,
        enabled: req.enabled,
    }))
}
