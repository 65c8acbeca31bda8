//! `SQLite` implementation of [`ToggleRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::ToggleRepository;
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::toggle::{Actuator, Channel, SensorToggle, SensorToggles};

use crate::error::StorageError;
use crate::store::SqliteStore;

struct Wrapper {
    sensor_name: String,
    toggle: SensorToggle,
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            sensor_name: row.try_get("sensor_name")?,
            toggle: SensorToggle {
                light_enabled: row.try_get("light_enabled")?,
                buzzer_enabled: row.try_get("buzzer_enabled")?,
            },
        })
    }
}

const SELECT_ALL: &str = "SELECT * FROM sensor_toggles";

const UPSERT_LIGHT: &str = r"
    INSERT INTO sensor_toggles (sensor_name, light_enabled, buzzer_enabled) VALUES (?, ?, ?)
    ON CONFLICT (sensor_name) DO UPDATE SET light_enabled = excluded.light_enabled
";

const UPSERT_BUZZER: &str = r"
    INSERT INTO sensor_toggles (sensor_name, light_enabled, buzzer_enabled) VALUES (?, ?, ?)
    ON CONFLICT (sensor_name) DO UPDATE SET buzzer_enabled = excluded.buzzer_enabled
";

impl ToggleRepository for SqliteStore {
    async fn get_all(&self) -> Result<SensorToggles, HomeGuardError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.sensor_name.parse::<Channel>() {
                Ok(channel) => Some((channel, row.toggle)),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring stored toggle for unknown channel");
                    None
                }
            })
            .collect())
    }

    async fn set(
        &self,
        channel: Channel,
        actuator: Actuator,
        enabled: bool,
    ) -> Result<(), HomeGuardError> {
        let mut toggle = channel.default_toggle();
        let query = match actuator {
            Actuator::Light => {
                toggle.light_enabled = enabled;
                UPSERT_LIGHT
            }
            Actuator::Buzzer => {
                toggle.buzzer_enabled = enabled;
                UPSERT_BUZZER
            }
        };

        sqlx::query(query)
            .bind(channel.display_name())
            .bind(toggle.light_enabled)
            .bind(toggle.buzzer_enabled)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
