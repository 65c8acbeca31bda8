//! Operator commands.
//!
//! A command rewrites the [`ControlState`] directly and is always followed by
//! an engine evaluation, so dwell and latch bookkeeping see the override.

use serde::{Deserialize, Serialize};

use crate::actuator::clamp_brightness;
use crate::effect::{LogKind, SideEffect};
use crate::engine::ControlState;
use crate::time::Timestamp;
use crate::timer::TimeoutClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    SetLight(bool),
    SetBuzzer(bool),
    SetManual(bool),
    SetHome(bool),
    /// Any integer is accepted and clamped into `[0, 100]`.
    SetBrightness(i64),
}

impl Command {
    /// Apply the command to `state` and return the effects to record.
    pub fn apply(self, state: &mut ControlState, now: Timestamp) -> Vec<SideEffect> {
        let before = *state;
        let message = match self {
            Self::SetLight(true) => {
                // a running activation keeps its instant and class
                if !state.actuators.light.is_on() {
                    state.actuators.light.switch_on(now, TimeoutClass::Other);
                }
                "Light turned ON (manual)".to_string()
            }
            Self::SetLight(false) => {
                state.actuators.light.switch_off();
                "Light turned OFF (manual)".to_string()
            }
            Self::SetBuzzer(true) => {
                if state.actuators.buzzer.is_on() {
                    state.actuators.buzzer.clear_latch();
                } else {
                    state.actuators.buzzer.switch_on(now, TimeoutClass::Other);
                }
                "Buzzer turned ON (manual)".to_string()
            }
            Self::SetBuzzer(false) => {
                state.actuators.buzzer.latch_off(now);
                "Buzzer turned OFF (manual)".to_string()
            }
            Self::SetManual(manual) => {
                state.mode.manual = manual;
                format!("Mode: {}", if manual { "Manual" } else { "Auto" })
            }
            Self::SetHome(home) => {
                state.mode.home = home;
                format!("Home mode: {}", if home { "Someone home" } else { "Away" })
            }
            Self::SetBrightness(value) => {
                let brightness = clamp_brightness(value);
                state.actuators.light.brightness = brightness;
                format!("Brightness set to {brightness}%")
            }
        };

        let mut effects = Vec::with_capacity(2);
        if *state != before {
            effects.push(SideEffect::PersistState);
        }
        effects.push(SideEffect::log(LogKind::Control, message));
        effects
    }
}
