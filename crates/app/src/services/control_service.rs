//! Control service: every path into the decision engine.
//!
//! Telemetry ingest, actuator polls, operator commands and toggle changes all
//! funnel through [`ControlService::run_cycle`], which holds one lock around
//! load → decide → save so two concurrent callers can never both decide
//! Off → On from the same stored state.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use homeguard_domain::command::Command;
use homeguard_domain::effect::{LogKind, SideEffect};
use homeguard_domain::engine::{ControlState, EngineInput, evaluate};
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::snapshot::SensorSnapshot;
use homeguard_domain::telemetry;
use homeguard_domain::toggle::{Actuator, Channel, SensorToggles};

use crate::ports::{
    Clock, ControlRepository, EventPublisher, Notifier, SnapshotRepository, Store, ToggleRepository,
};
use crate::services::emitter::Emitter;

/// What changes the state just before the engine runs.
#[derive(Debug, Clone, Copy)]
enum Override {
    None,
    Command(Command),
    Toggle {
        channel: Channel,
        actuator: Actuator,
        enabled: bool,
    },
}

/// Latest snapshot together with the control state, for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemState {
    pub snapshot: Option<SensorSnapshot>,
    pub control: ControlState,
}

pub struct ControlService<S, C, P, N> {
    store: Arc<S>,
    clock: C,
    emitter: Arc<Emitter<S, P, N>>,
    cycle: Mutex<()>,
}

impl<S, C, P, N> ControlService<S, C, P, N>
where
    S: Store,
    C: Clock,
    P: EventPublisher + Send + Sync,
    N: Notifier + Send + Sync,
{
    pub fn new(store: Arc<S>, clock: C, emitter: Arc<Emitter<S, P, N>>) -> Self {
        Self {
            store,
            clock,
            emitter,
            cycle: Mutex::new(()),
        }
    }

    /// Decode and store a telemetry upload, then run a cycle.
    ///
    /// Malformed fields never fail the upload; see [`telemetry::decode`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeGuardError::Storage`] when the snapshot or the resulting
    /// state cannot be written.
    #[tracing::instrument(skip(self, body))]
    pub async fn ingest(
        &self,
        body: &serde_json::Value,
    ) -> Result<(SensorSnapshot, ControlState), HomeGuardError> {
        let snapshot = telemetry::decode(body, self.clock.now());
        let snapshot = self.store.insert(snapshot).await?;
        let state = self.run_cycle(Override::None).await?;
        Ok((snapshot, state))
    }

    /// Actuator board poll: re-evaluate against the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error when state cannot be read or written.
    #[tracing::instrument(skip(self))]
    pub async fn poll(&self) -> Result<ControlState, HomeGuardError> {
        self.run_cycle(Override::None).await
    }

    /// Apply an operator command and re-evaluate.
    ///
    /// # Errors
    ///
    /// Returns a storage error when state cannot be read or written.
    #[tracing::instrument(skip(self))]
    pub async fn command(&self, command: Command) -> Result<ControlState, HomeGuardError> {
        self.run_cycle(Override::Command(command)).await
    }

    /// Enable or disable one channel for one actuator and re-evaluate.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the toggle or state cannot be written.
    #[tracing::instrument(skip(self))]
    pub async fn set_toggle(
        &self,
        channel: Channel,
        actuator: Actuator,
        enabled: bool,
    ) -> Result<ControlState, HomeGuardError> {
        self.run_cycle(Override::Toggle {
            channel,
            actuator,
            enabled,
        })
        .await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn toggles(&self) -> Result<SensorToggles, HomeGuardError> {
        self.store.get_all().await
    }

    /// Read-only view; does not run a cycle.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn system_state(&self) -> Result<SystemState, HomeGuardError> {
        Ok(SystemState {
            snapshot: self.store.latest().await?,
            control: self.store.load().await?,
        })
    }

    /// Up to `limit` recent snapshots, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn history(&self, limit: u32) -> Result<Vec<SensorSnapshot>, HomeGuardError> {
        self.store.history(limit).await
    }

    async fn run_cycle(&self, adjust: Override) -> Result<ControlState, HomeGuardError> {
        let _guard = self.cycle.lock().await;
        let now = self.clock.now();

        let loaded = self.store.load().await?;
        let mut state = loaded;
        let mut effects = Vec::new();

        match adjust {
            Override::None => {}
            Override::Command(command) => effects.extend(command.apply(&mut state, now)),
            Override::Toggle {
                channel,
                actuator,
                enabled,
            } => {
                self.store.set(channel, actuator, enabled).await?;
                effects.push(SideEffect::log(
                    LogKind::Control,
                    format!(
                        "{channel} {actuator} control {}",
                        if enabled { "ENABLED" } else { "DISABLED" }
                    ),
                ));
            }
        }

        let snapshot = self
            .store
            .latest()
            .await?
            .unwrap_or_else(|| SensorSnapshot::inactive(now));
        let toggles = self.store.get_all().await?;
        let decision = evaluate(
            EngineInput {
                snapshot: &snapshot,
                state: &state,
                toggles: &toggles,
            },
            now,
        );
        effects.extend(decision.effects);
        let next = decision.state;

        if next != loaded {
            self.store.save(&next).await?;
        }

        tracing::debug!(
            light = next.actuators.light.is_on(),
            brightness = next.actuators.light.brightness,
            buzzer = next.actuators.buzzer.is_on(),
            latched = next.actuators.buzzer.is_latched(),
            effects = effects.len(),
            "control cycle evaluated"
        );

        self.emitter.apply(&effects, now).await;
        if next.actuators != loaded.actuators || next.mode != loaded.mode {
            self.emitter.actuators_changed(&next).await;
        }

        Ok(next)
    }
}
