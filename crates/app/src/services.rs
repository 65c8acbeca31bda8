//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod activity_service;
pub mod board_service;
pub mod control_service;
pub mod emitter;

#[cfg(test)]
pub(crate) mod fakes;
