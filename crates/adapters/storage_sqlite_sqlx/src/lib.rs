//! # homeguard-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `homeguard-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `homeguard-app` (for port traits) and `homeguard-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod board_repo;
mod control_repo;
mod error;
mod event_log_repo;
mod notification_repo;
mod pool;
mod snapshot_repo;
mod store;
mod toggle_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use store::SqliteStore;
