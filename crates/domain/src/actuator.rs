//! Actuator state: the shared light and buzzer.
//!
//! An actuator is on exactly when it carries an [`Activation`], so the
//! activation instant can never outlive the on state.

use serde::{Deserialize, Serialize};

use crate::snapshot::ADC_MAX;
use crate::threshold::LIGHT_THRESHOLD;
use crate::time::Timestamp;
use crate::timer::{Activation, TimeoutClass};

const MIN_AUTO_BRIGHTNESS: i64 = 20;
const MAX_BRIGHTNESS: i64 = 100;

/// Brightness chosen when the light is switched on automatically.
///
/// Darker rooms get a brighter light: `light_level = 2000` maps to 20 and
/// `light_level = 4095` maps to 100.
#[must_use]
pub fn brightness_for(light_level: i64) -> u8 {
    let span = ADC_MAX - LIGHT_THRESHOLD;
    let mapped = MIN_AUTO_BRIGHTNESS
        + (light_level - LIGHT_THRESHOLD) * (MAX_BRIGHTNESS - MIN_AUTO_BRIGHTNESS) / span;
    clamp_brightness(mapped.clamp(MIN_AUTO_BRIGHTNESS, MAX_BRIGHTNESS))
}

/// Clamp an operator-supplied brightness into `[0, 100]`.
#[must_use]
pub fn clamp_brightness(value: i64) -> u8 {
    u8::try_from(value.clamp(0, MAX_BRIGHTNESS)).unwrap_or(u8::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    pub brightness: u8,
    pub activation: Option<Activation>,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            brightness: 100,
            activation: None,
        }
    }
}

impl LightState {
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.activation.is_some()
    }

    pub fn switch_on(&mut self, at: Timestamp, class: TimeoutClass) {
        self.activation = Some(Activation::new(at, class));
    }

    pub fn switch_off(&mut self) {
        self.activation = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuzzerState {
    pub activation: Option<Activation>,
    /// Set by an explicit "buzzer off" command; holds the latch instant.
    pub latched_at: Option<Timestamp>,
}

impl BuzzerState {
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.activation.is_some()
    }

    #[must_use]
    pub fn is_latched(&self) -> bool {
        self.latched_at.is_some()
    }

    pub fn switch_on(&mut self, at: Timestamp, class: TimeoutClass) {
        self.activation = Some(Activation::new(at, class));
        self.latched_at = None;
    }

    pub fn switch_off(&mut self) {
        self.activation = None;
    }

    /// Force off and ignore persisting conditions until a fresh trigger.
    pub fn latch_off(&mut self, at: Timestamp) {
        self.activation = None;
        self.latched_at = Some(at);
    }

    pub fn clear_latch(&mut self) {
        self.latched_at = None;
    }
}

/// Both actuators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorState {
    pub light: LightState,
    pub buzzer: BuzzerState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_map_brightness_boundaries() {
        assert_eq!(brightness_for(2000), 20);
        assert_eq!(brightness_for(4095), 100);
    }

    #[test]
    fn should_clamp_brightness_below_dark_threshold() {
        assert_eq!(brightness_for(0), 20);
        assert_eq!(brightness_for(1999), 20);
    }

    #[test]
    fn should_truncate_intermediate_brightness() {
        // 20 + 1000 * 80 / 2095 = 20 + 38.18
        assert_eq!(brightness_for(3000), 58);
    }

    #[test]
    fn should_clamp_manual_brightness() {
        assert_eq!(clamp_brightness(-5), 0);
        assert_eq!(clamp_brightness(55), 55);
        assert_eq!(clamp_brightness(250), 100);
    }

    #[test]
    fn should_boot_with_both_actuators_off_at_full_brightness() {
        let state = ActuatorState::default();
        assert!(!state.light.is_on());
        assert!(!state.buzzer.is_on());
        assert!(!state.buzzer.is_latched());
        assert_eq!(state.light.brightness, 100);
    }

    #[test]
    fn should_clear_latch_when_buzzer_switched_on() {
        let t = now();
        let mut buzzer = BuzzerState::default();
        buzzer.latch_off(t);
        assert!(buzzer.is_latched());
        buzzer.switch_on(t, TimeoutClass::Other);
        assert!(buzzer.is_on());
        assert!(!buzzer.is_latched());
    }
}
