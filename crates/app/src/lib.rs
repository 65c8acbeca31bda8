//! # homeguard-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SnapshotRepository`: store and query sensor snapshots
//!   - `ControlRepository`: load and save the singleton control state
//!   - `ToggleRepository`: per-channel light/buzzer enables
//!   - `EventLog`, `NotificationStore`: records produced by the engine
//!   - `BoardSettingsRepository`: settings served to the sensor board
//!   - `Notifier`: outbound delivery of notifications
//!   - `Clock`: the single source of `now`
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ControlService`: ingest telemetry, answer polls, apply commands
//!   - `ActivityService`: event log and notification inbox
//!   - `BoardService`: sensor board settings
//! - Provide **in-process infrastructure** (event bus, tracing notifier)
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `homeguard-domain` only (plus `tokio::sync` for channels and
//! the control-cycle lock). Never imports adapter crates.

pub mod event_bus;
pub mod notifier;
pub mod ports;
pub mod services;
