//! # homeguard-domain
//!
//! Pure domain model for the homeguard automation-decision engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **sensor snapshots** and the typed decode step that produces them
//! - Define the **threshold classifier** (raw reading → per-channel predicate)
//! - Define the **sensor toggle registry** (per-channel light/buzzer enables)
//! - Define the **mode gate** (manual/auto × home/away → activation permission)
//! - Define the **timer registry** (activation instant + dwell class)
//! - Define the **decision engine**: a pure transition function from
//!   (snapshot, control state, mode, toggles, now) to (next state, side effects)
//! - Define **manual commands** and how they rewrite state before evaluation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod actuator;
pub mod board;
pub mod command;
pub mod effect;
pub mod engine;
pub mod event;
pub mod mode;
pub mod snapshot;
pub mod telemetry;
pub mod threshold;
pub mod timer;
pub mod toggle;
