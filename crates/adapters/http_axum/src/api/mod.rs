//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod notifications;
#[allow(clippy::missing_errors_doc)]
pub mod sensor_board;
#[allow(clippy::missing_errors_doc)]
pub mod sensor_controls;
#[allow(clippy::missing_errors_doc)]
pub mod sensor_data;
pub mod sse;

use axum::Router;
use axum::routing::{delete, get, post, put};

use homeguard_app::ports::{Clock, Notifier, Store};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, C, N>() -> Router<AppState<S, C, N>>
where
    S: Store,
    C: Clock + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        // Sensor board uploads and history
        .route("/sensor-data", post(sensor_data::ingest::<S, C, N>))
        .route("/sensor-data/history", get(sensor_data::history::<S, C, N>))
        // Actuator board and operator controls
        .route("/control/commands", get(control::commands::<S, C, N>))
        .route("/system-state", get(control::system_state::<S, C, N>))
        .route("/control/light", put(control::set_light::<S, C, N>))
        .route("/control/buzzer", put(control::set_buzzer::<S, C, N>))
        .route("/control/mode", put(control::set_mode::<S, C, N>))
        .route("/control/brightness", put(control::set_brightness::<S, C, N>))
        .route("/control/home-mode", put(control::set_home_mode::<S, C, N>))
        // Sensor toggles
        .route("/sensor-controls", get(sensor_controls::list::<S, C, N>))
        .route(
            "/sensor-control/toggle",
            post(sensor_controls::toggle::<S, C, N>),
        )
        // Event log
        .route("/events", get(events::list::<S, C, N>))
        .route("/events/clear", delete(events::clear::<S, C, N>))
        // Notifications
        .route("/notifications", get(notifications::list::<S, C, N>))
        .route(
            "/notifications/{id}/read",
            put(notifications::mark_read::<S, C, N>),
        )
        .route(
            "/notifications/clear",
            delete(notifications::clear::<S, C, N>),
        )
        // Sensor board settings
        .route("/sensor-board/commands", get(sensor_board::commands::<S, C, N>))
        .route(
            "/sensor-board/upload-interval",
            put(sensor_board::set_upload_interval::<S, C, N>),
        )
        .route(
            "/sensor-board/monitoring",
            put(sensor_board::set_monitoring::<S, C, N>),
        )
        .route(
            "/sensor-board/encryption",
            put(sensor_board::set_encryption::<S, C, N>),
        )
        // Live updates
        .route("/stream", get(sse::stream::<S, C, N>))
}
