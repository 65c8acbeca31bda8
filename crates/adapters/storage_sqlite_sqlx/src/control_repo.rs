//! `SQLite` implementation of [`ControlRepository`].
//!
//! The control state lives in a single row (`id = 1`) seeded by the
//! initial migration.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::ControlRepository;
use homeguard_domain::actuator::{ActuatorState, BuzzerState, LightState, clamp_brightness};
use homeguard_domain::engine::{AlertMemory, ControlState};
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::mode::Mode;
use homeguard_domain::threshold::Predicates;
use homeguard_domain::time::now;
use homeguard_domain::timer::Activation;

use crate::error::StorageError;
use crate::store::{SqliteStore, decode_err, decode_opt_ts, decode_ts, encode_ts};

struct Wrapper(ControlState);

fn activation(
    at: Option<String>,
    class: Option<String>,
) -> Result<Option<Activation>, sqlx::Error> {
    match (at, class) {
        (Some(at), Some(class)) => Ok(Some(Activation::new(
            decode_ts(&at)?,
            class.parse().map_err(decode_err)?,
        ))),
        _ => Ok(None),
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let brightness: i64 = row.try_get("light_brightness")?;
        let latched_at: Option<String> = row.try_get("buzzer_latched_at")?;
        let previous: String = row.try_get("previous_predicates")?;
        let gas_notified_at: Option<String> = row.try_get("gas_notified_at")?;

        let previous: Predicates = serde_json::from_str(&previous).map_err(decode_err)?;

        Ok(Self(ControlState {
            actuators: ActuatorState {
                light: LightState {
                    brightness: clamp_brightness(brightness),
                    activation: activation(
                        row.try_get("light_activated_at")?,
                        row.try_get("light_class")?,
                    )?,
                },
                buzzer: BuzzerState {
                    activation: activation(
                        row.try_get("buzzer_activated_at")?,
                        row.try_get("buzzer_class")?,
                    )?,
                    latched_at: decode_opt_ts(latched_at.as_deref())?,
                },
            },
            mode: Mode {
                manual: row.try_get("manual_mode")?,
                home: row.try_get("home_mode")?,
            },
            memory: AlertMemory {
                previous,
                gas_notified_at: decode_opt_ts(gas_notified_at.as_deref())?,
            },
        }))
    }
}

const SELECT: &str = "SELECT * FROM control_state WHERE id = 1";

const UPSERT: &str = r"
    INSERT INTO control_state (id, light_brightness, light_activated_at, light_class,
        buzzer_activated_at, buzzer_class, buzzer_latched_at, manual_mode, home_mode,
        previous_predicates, gas_notified_at, updated_at)
    VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        light_brightness = excluded.light_brightness,
        light_activated_at = excluded.light_activated_at,
        light_class = excluded.light_class,
        buzzer_activated_at = excluded.buzzer_activated_at,
        buzzer_class = excluded.buzzer_class,
        buzzer_latched_at = excluded.buzzer_latched_at,
        manual_mode = excluded.manual_mode,
        home_mode = excluded.home_mode,
        previous_predicates = excluded.previous_predicates,
        gas_notified_at = excluded.gas_notified_at,
        updated_at = excluded.updated_at
";

impl ControlRepository for SqliteStore {
    async fn load(&self) -> Result<ControlState, HomeGuardError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0).unwrap_or_default())
    }

    async fn save(&self, state: &ControlState) -> Result<(), HomeGuardError> {
        let light = state.actuators.light;
        let buzzer = state.actuators.buzzer;
        let previous = serde_json::to_string(&state.memory.previous).map_err(StorageError::from)?;

        sqlx::query(UPSERT)
            .bind(i64::from(light.brightness))
            .bind(light.activation.map(|a| encode_ts(a.at)))
            .bind(light.activation.map(|a| a.class.as_str()))
            .bind(buzzer.activation.map(|a| encode_ts(a.at)))
            .bind(buzzer.activation.map(|a| a.class.as_str()))
            .bind(buzzer.latched_at.map(encode_ts))
            .bind(state.mode.manual)
            .bind(state.mode.home)
            .bind(previous)
            .bind(state.memory.gas_notified_at.map(encode_ts))
            .bind(encode_ts(now()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
