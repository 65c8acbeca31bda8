//! The `SQLite` store and the column codecs shared by its port impls.
//!
//! Timestamps are stored as fixed-width RFC 3339 text in UTC so that
//! lexical order matches time order.

use chrono::{DateTime, SecondsFormat};
use sqlx::SqlitePool;

use homeguard_domain::time::Timestamp;

/// `SQLite`-backed implementation of every storage port.
#[derive(Clone)]
pub struct SqliteStore {
    pub(crate) pool: SqlitePool,
}

impl SqliteStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn encode_ts(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_ts(raw: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.to_utc())
        .map_err(decode_err)
}

pub(crate) fn decode_opt_ts(raw: Option<&str>) -> Result<Option<Timestamp>, sqlx::Error> {
    raw.map(decode_ts).transpose()
}

pub(crate) fn decode_err(
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> sqlx::Error {
    sqlx::Error::Decode(err.into())
}

/// Connect to a fresh in-memory database with migrations applied.
#[cfg(test)]
pub(crate) async fn memory_store() -> SqliteStore {
    let db = crate::pool::Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .unwrap();
    SqliteStore::new(db.pool().clone())
}
