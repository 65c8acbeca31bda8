//! Actuator board polling, the dashboard system view and operator commands.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use homeguard_app::ports::{Clock, Notifier, Store};
use homeguard_domain::command::Command;
use homeguard_domain::engine::ControlState;
use homeguard_domain::error::ValidationError;
use homeguard_domain::snapshot::{AirQualityStatus, SensorSnapshot};
use homeguard_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// What the actuator board needs to drive its outputs.
#[derive(Debug, Serialize)]
pub struct ActuatorView {
    pub light_on: bool,
    pub buzzer_on: bool,
    pub manual_mode: bool,
    pub brightness_level: u8,
    pub home_mode: bool,
}

impl From<&ControlState> for ActuatorView {
    fn from(state: &ControlState) -> Self {
        Self {
            light_on: state.actuators.light.is_on(),
            buzzer_on: state.actuators.buzzer.is_on(),
            manual_mode: state.mode.manual,
            brightness_level: state.actuators.light.brightness,
            home_mode: state.mode.home,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SensorsView {
    pub pir_motion: bool,
    pub flame_detected: bool,
    pub door_open: bool,
    pub air_quality: i64,
    pub air_quality_percent: u8,
    pub air_quality_status: AirQualityStatus,
    pub sound_level: i64,
    pub light_level: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub last_update: Timestamp,
}

impl From<&SensorSnapshot> for SensorsView {
    fn from(snapshot: &SensorSnapshot) -> Self {
        Self {
            pir_motion: snapshot.pir_motion,
            flame_detected: snapshot.flame_detected,
            door_open: snapshot.door_open,
            air_quality: snapshot.air_quality,
            air_quality_percent: snapshot.air_quality_percent(),
            air_quality_status: snapshot.air_quality_status(),
            sound_level: snapshot.sound_level,
            light_level: snapshot.light_level,
            temperature: snapshot.temperature,
            humidity: snapshot.humidity,
            last_update: snapshot.observed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStateBody {
    /// `null` until the first upload.
    pub sensors: Option<SensorsView>,
    pub system: ActuatorView,
}

#[derive(Debug, Deserialize)]
pub struct SwitchRequest {
    pub state: bool,
}

#[derive(Debug, Deserialize)]
pub struct ModeRequest {
    pub mode: String,
}

#[derive(Debug, Deserialize)]
pub struct BrightnessRequest {
    pub brightness: i64,
}

#[derive(Debug, Deserialize)]
pub struct HomeModeRequest {
    pub home_mode: bool,
}

/// `GET /api/control/commands`: actuator board poll. Runs a control cycle
/// so dwell expiry is noticed even when no telemetry arrives.
pub async fn commands<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let control = state.control.poll().await?;
    Ok(Json(ActuatorView::from(&control)))
}

/// `GET /api/system-state`
pub async fn system_state<S, C, N>(
    State(state): State<AppState<S, C, N>>,
) -> Result<Json<SystemStateBody>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let system = state.control.system_state().await?;
    Ok(Json(SystemStateBody {
        sensors: system.snapshot.as_ref().map(SensorsView::from),
        system: ActuatorView::from(&system.control),
    }))
}

async fn run<S, C, N>(
    state: &AppState<S, C, N>,
    command: Command,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let control = state.control.command(command).await?;
    Ok(Json(ActuatorView::from(&control)))
}

/// `PUT /api/control/light`
pub async fn set_light<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<SwitchRequest>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    run(&state, Command::SetLight(req.state)).await
}

/// `PUT /api/control/buzzer`: turning the buzzer off also latches it.
pub async fn set_buzzer<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<SwitchRequest>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    run(&state, Command::SetBuzzer(req.state)).await
}

/// `PUT /api/control/mode` with `{"mode": "manual" | "auto"}`.
pub async fn set_mode<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<ModeRequest>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let manual = match req.mode.as_str() {
        "manual" => true,
        "auto" => false,
        other => return Err(ValidationError::UnknownMode(other.to_string()).into()),
    };
    run(&state, Command::SetManual(manual)).await
}

/// `PUT /api/control/brightness`: any integer, clamped into `[0, 100]`.
pub async fn set_brightness<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<BrightnessRequest>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    run(&state, Command::SetBrightness(req.brightness)).await
}

/// `PUT /api/control/home-mode`
pub async fn set_home_mode<S, C, N>(
    State(state): State<AppState<S, C, N>>,
    Json(req): Json<HomeModeRequest>,
) -> Result<Json<ActuatorView>, ApiError>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    run(&state, Command::SetHome(req.home_mode)).await
}
