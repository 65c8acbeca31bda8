//! `SQLite` implementation of [`EventLog`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::{EventLog, Page};
use homeguard_domain::effect::LogEntry;
use homeguard_domain::error::HomeGuardError;

use crate::error::StorageError;
use crate::store::{SqliteStore, decode_err, decode_ts, encode_ts};

struct Wrapper(LogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let kind: String = row.try_get("kind")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        Ok(Self(LogEntry {
            id: id.parse().map_err(decode_err)?,
            kind: kind.parse().map_err(decode_err)?,
            message: row.try_get("message")?,
            recorded_at: decode_ts(&recorded_at)?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO event_log (id, kind, message, recorded_at) VALUES (?, ?, ?, ?)";
const SELECT_PAGE: &str =
    "SELECT * FROM event_log ORDER BY recorded_at DESC, rowid DESC LIMIT ? OFFSET ?";
const COUNT: &str = "SELECT COUNT(*) FROM event_log";
const DELETE_ALL: &str = "DELETE FROM event_log";

impl EventLog for SqliteStore {
    async fn append(&self, entry: LogEntry) -> Result<LogEntry, HomeGuardError> {
        sqlx::query(INSERT)
            .bind(entry.id.to_string())
            .bind(entry.kind.as_str())
            .bind(&entry.message)
            .bind(encode_ts(entry.recorded_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(entry)
    }

    async fn page(&self, page: u32, per_page: u32) -> Result<Page<LogEntry>, HomeGuardError> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);

        let total: i64 = sqlx::query_scalar(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE)
            .bind(i64::from(per_page))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Page {
            items: rows.into_iter().map(|w| w.0).collect(),
            page,
            per_page,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn clear_log(&self) -> Result<(), HomeGuardError> {
        sqlx::query(DELETE_ALL)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
