//! `SQLite` implementation of [`SnapshotRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::SnapshotRepository;
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::id::ReadingId;
use homeguard_domain::snapshot::SensorSnapshot;

use crate::error::StorageError;
use crate::store::{SqliteStore, decode_ts, encode_ts};

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(SensorSnapshot);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let observed_at: String = row.try_get("observed_at")?;

        Ok(Self(SensorSnapshot {
            pir_motion: row.try_get("pir_motion")?,
            flame_detected: row.try_get("flame_detected")?,
            door_open: row.try_get("door_open")?,
            air_quality: row.try_get("air_quality")?,
            sound_level: row.try_get("sound_level")?,
            light_level: row.try_get("light_level")?,
            temperature: row.try_get("temperature")?,
            humidity: row.try_get("humidity")?,
            observed_at: decode_ts(&observed_at)?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO sensor_readings (id, pir_motion, flame_detected, door_open, air_quality,
        sound_level, light_level, temperature, humidity, observed_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str =
    "SELECT * FROM sensor_readings ORDER BY observed_at DESC, rowid DESC LIMIT ?";

impl SnapshotRepository for SqliteStore {
    async fn insert(&self, snapshot: SensorSnapshot) -> Result<SensorSnapshot, HomeGuardError> {
        sqlx::query(INSERT)
            .bind(ReadingId::new().to_string())
            .bind(snapshot.pir_motion)
            .bind(snapshot.flame_detected)
            .bind(snapshot.door_open)
            .bind(snapshot.air_quality)
            .bind(snapshot.sound_level)
            .bind(snapshot.light_level)
            .bind(snapshot.temperature)
            .bind(snapshot.humidity)
            .bind(encode_ts(snapshot.observed_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(snapshot)
    }

    async fn latest(&self) -> Result<Option<SensorSnapshot>, HomeGuardError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(1_i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }

    async fn history(&self, limit: u32) -> Result<Vec<SensorSnapshot>, HomeGuardError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().rev().map(|w| w.0).collect())
    }
}
