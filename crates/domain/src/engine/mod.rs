//! Decision engine: the single transition function of the control loop.
//!
//! [`evaluate`] takes the latest snapshot, the persisted [`ControlState`],
//! the toggle registry and the current instant, and returns the next state
//! together with the side effects the caller must apply. It performs no IO
//! and reads no clock, so re-running it on the same inputs is safe.
//!
//! Evaluation order:
//! 1. classify the snapshot into [`Predicates`]
//! 2. resolve the mode gate into a [`Demand`] per actuator
//! 3. step the light, then the buzzer, honouring dwell and the buzzer latch
//! 4. emit detection logs and notifications on rising edges
//! 5. remember the predicates for the next evaluation

mod alerts;
mod buzzer;
mod light;

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorState;
use crate::effect::SideEffect;
use crate::mode::{Demand, Mode, gate};
use crate::snapshot::SensorSnapshot;
use crate::threshold::Predicates;
use crate::time::Timestamp;
use crate::toggle::SensorToggles;

/// Bookkeeping that lets edges and throttles be computed from stored state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMemory {
    /// Predicates seen at the previous evaluation.
    pub previous: Predicates,
    pub gas_notified_at: Option<Timestamp>,
}

/// Everything the engine owns between evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub actuators: ActuatorState,
    pub mode: Mode,
    pub memory: AlertMemory,
}

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EngineInput<'a> {
    pub snapshot: &'a SensorSnapshot,
    pub state: &'a ControlState,
    pub toggles: &'a SensorToggles,
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub state: ControlState,
    pub effects: Vec<SideEffect>,
}

impl Decision {
    /// Whether the state differs from the one evaluated.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, SideEffect::PersistState))
    }
}

/// Shared view of one evaluation passed to the per-actuator steps.
pub(crate) struct Context<'a> {
    pub current: Predicates,
    pub previous: Predicates,
    pub demand: Demand,
    pub mode: Mode,
    pub snapshot: &'a SensorSnapshot,
    pub now: Timestamp,
}

/// Compute the next control state and its side effects.
#[must_use]
pub fn evaluate(input: EngineInput<'_>, now: Timestamp) -> Decision {
    let before = *input.state;
    let current = Predicates::classify(input.snapshot);
    let ctx = Context {
        current,
        previous: before.memory.previous,
        demand: gate(&current, before.mode, input.toggles),
        mode: before.mode,
        snapshot: input.snapshot,
        now,
    };

    let mut state = before;
    let mut effects = Vec::new();

    light::step(&mut state.actuators.light, &ctx, &mut effects);
    buzzer::step(&mut state.actuators.buzzer, &ctx, &mut effects);
    alerts::detect(&mut state.memory, &ctx, &mut effects);
    state.memory.previous = current;

    if state != before {
        effects.insert(0, SideEffect::PersistState);
    }

    Decision { state, effects }
}
