//! `SQLite` implementation of [`BoardSettingsRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::BoardSettingsRepository;
use homeguard_domain::board::SensorBoardSettings;
use homeguard_domain::error::HomeGuardError;

use crate::error::StorageError;
use crate::store::SqliteStore;

struct Wrapper(SensorBoardSettings);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(SensorBoardSettings {
            monitoring: row.try_get("monitoring")?,
            encryption_enabled: row.try_get("encryption_enabled")?,
            upload_interval_ms: row.try_get("upload_interval_ms")?,
        }))
    }
}

const SELECT: &str = "SELECT * FROM sensor_board_settings WHERE id = 1";

const UPSERT: &str = r"
    INSERT INTO sensor_board_settings (id, monitoring, encryption_enabled, upload_interval_ms)
    VALUES (1, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        monitoring = excluded.monitoring,
        encryption_enabled = excluded.encryption_enabled,
        upload_interval_ms = excluded.upload_interval_ms
";

impl BoardSettingsRepository for SqliteStore {
    async fn load_settings(&self) -> Result<SensorBoardSettings, HomeGuardError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0).unwrap_or_default())
    }

    async fn save_settings(&self, settings: &SensorBoardSettings) -> Result<(), HomeGuardError> {
        sqlx::query(UPSERT)
            .bind(settings.monitoring)
            .bind(settings.encryption_enabled)
            .bind(settings.upload_interval_ms)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
