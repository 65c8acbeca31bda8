//! # homeguard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API used by the sensor board, the actuator board and
//!   the operator dashboard (`/api/sensor-data`, `/api/control/*`, ...)
//! - Stream hub events to live subscribers over SSE (`/api/stream`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `homeguard-app` (for port traits and services) and
//! `homeguard-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
