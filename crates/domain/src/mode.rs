//! Mode gate: resolves manual/auto and home/away into per-actuator demand.
//!
//! Each route below is one reason an actuator may be switched on. A route
//! only counts when the mode allows it and the channel toggle for that
//! actuator is enabled.

use serde::{Deserialize, Serialize};

use crate::threshold::Predicates;
use crate::toggle::{Actuator, Channel, SensorToggles};

/// Operator-selected operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    /// Operator drives actuators directly; automation is suppressed.
    pub manual: bool,
    /// Someone is home; motion is not treated as an intrusion.
    pub home: bool,
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            manual: false,
            home: true,
        }
    }
}

/// A reason for switching an actuator on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Fire,
    GasLeak,
    LoudNoise,
    Motion,
    Door,
    /// Door open while the room is dark.
    DoorInDark,
}

impl Route {
    /// Whether the route holds for the given predicates, ignoring mode.
    #[must_use]
    pub fn holds(self, p: &Predicates) -> bool {
        match self {
            Self::Fire => p.fire,
            Self::GasLeak => p.gas_leak,
            Self::LoudNoise => p.loud_noise,
            Self::Motion => p.motion,
            Self::Door => p.door_open,
            Self::DoorInDark => p.door_open && p.low_light,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Fire => "FIRE DETECTED",
            Self::GasLeak => "GAS LEAK",
            Self::LoudNoise => "LOUD NOISE",
            Self::Motion => "MOTION DETECTED",
            Self::Door => "DOOR OPENED",
            Self::DoorInDark => "DOOR OPENED IN LOW LIGHT",
        }
    }

    /// Holds now but did not hold at the previous evaluation.
    #[must_use]
    pub fn is_rising(self, current: &Predicates, previous: &Predicates) -> bool {
        self.holds(current) && !self.holds(previous)
    }
}

/// Routes currently asking for each actuator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demand {
    pub light: Vec<Route>,
    pub buzzer: Vec<Route>,
}

impl Demand {
    #[must_use]
    pub fn wants_light(&self) -> bool {
        !self.light.is_empty()
    }

    #[must_use]
    pub fn wants_buzzer(&self) -> bool {
        !self.buzzer.is_empty()
    }

    /// Whether any route for `actuator` fired for the first time.
    #[must_use]
    pub fn has_rising(&self, actuator: Actuator, current: &Predicates, previous: &Predicates) -> bool {
        let routes = match actuator {
            Actuator::Light => &self.light,
            Actuator::Buzzer => &self.buzzer,
        };
        routes.iter().any(|r| r.is_rising(current, previous))
    }
}

/// Compute which routes ask for which actuator.
#[must_use]
pub fn gate(p: &Predicates, mode: Mode, toggles: &SensorToggles) -> Demand {
    let mut demand = Demand::default();
    let auto = !mode.manual;
    let away = !mode.home;

    let mut want = |route: Route, channel: Channel, actuator: Actuator, allowed: bool| {
        if allowed && route.holds(p) && toggles.allows(channel, actuator) {
            match actuator {
                Actuator::Light => demand.light.push(route),
                Actuator::Buzzer => demand.buzzer.push(route),
            }
        }
    };

    // Critical channels reach the light even in manual mode.
    want(Route::Fire, Channel::Flame, Actuator::Light, true);
    want(Route::Fire, Channel::Flame, Actuator::Buzzer, auto);
    want(Route::GasLeak, Channel::AirQuality, Actuator::Light, true);
    want(Route::GasLeak, Channel::AirQuality, Actuator::Buzzer, auto);

    want(Route::LoudNoise, Channel::Sound, Actuator::Light, auto);
    want(Route::LoudNoise, Channel::Sound, Actuator::Buzzer, auto);

    want(Route::Motion, Channel::Motion, Actuator::Light, auto);
    want(Route::Motion, Channel::Motion, Actuator::Buzzer, auto && away);

    want(Route::Door, Channel::Door, Actuator::Light, auto && away);
    want(Route::Door, Channel::Door, Actuator::Buzzer, auto && away);

    let dark_allowed = auto && toggles.allows(Channel::AmbientLight, Actuator::Light);
    want(Route::DoorInDark, Channel::Door, Actuator::Light, dark_allowed);

    demand
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTO_HOME: Mode = Mode {
        manual: false,
        home: true,
    };
    const AUTO_AWAY: Mode = Mode {
        manual: false,
        home: false,
    };
    const MANUAL_AWAY: Mode = Mode {
        manual: true,
        home: false,
    };

    fn toggles() -> SensorToggles {
        SensorToggles::defaults()
    }

    #[test]
    fn should_default_to_auto_and_home() {
        assert_eq!(Mode::default(), AUTO_HOME);
    }

    #[test]
    fn should_drive_light_only_when_motion_at_home() {
        let p = Predicates {
            motion: true,
            ..Predicates::default()
        };
        let demand = gate(&p, AUTO_HOME, &toggles());
        assert!(demand.wants_light());
        assert!(!demand.wants_buzzer());
    }

    #[test]
    fn should_drive_both_when_motion_while_away() {
        let p = Predicates {
            motion: true,
            ..Predicates::default()
        };
        let demand = gate(&p, AUTO_AWAY, &toggles());
        assert_eq!(demand.light, vec![Route::Motion]);
        assert_eq!(demand.buzzer, vec![Route::Motion]);
    }

    #[test]
    fn should_drive_buzzer_when_door_open_while_away() {
        let p = Predicates {
            door_open: true,
            ..Predicates::default()
        };
        assert!(gate(&p, AUTO_AWAY, &toggles()).wants_buzzer());
        assert!(!gate(&p, AUTO_HOME, &toggles()).wants_buzzer());
    }

    #[test]
    fn should_drive_light_when_door_open_in_the_dark_at_home() {
        let p = Predicates {
            door_open: true,
            low_light: true,
            ..Predicates::default()
        };
        let demand = gate(&p, AUTO_HOME, &toggles());
        assert_eq!(demand.light, vec![Route::DoorInDark]);
        assert!(!demand.wants_buzzer());
    }

    #[test]
    fn should_not_drive_dark_door_route_when_ldr_light_toggle_disabled() {
        let p = Predicates {
            door_open: true,
            low_light: true,
            ..Predicates::default()
        };
        let mut toggles = toggles();
        toggles.set(Channel::AmbientLight, Actuator::Light, false);
        assert!(!gate(&p, AUTO_HOME, &toggles).wants_light());
    }

    #[test]
    fn should_allow_critical_light_but_no_buzzer_when_manual() {
        let p = Predicates {
            fire: true,
            gas_leak: true,
            motion: true,
            loud_noise: true,
            ..Predicates::default()
        };
        let demand = gate(&p, MANUAL_AWAY, &toggles());
        assert_eq!(demand.light, vec![Route::Fire, Route::GasLeak]);
        assert!(!demand.wants_buzzer());
    }

    #[test]
    fn should_respect_channel_toggle_per_actuator() {
        let p = Predicates {
            loud_noise: true,
            ..Predicates::default()
        };
        let mut toggles = toggles();
        toggles.set(Channel::Sound, Actuator::Buzzer, false);
        let demand = gate(&p, AUTO_HOME, &toggles);
        assert!(demand.wants_light());
        assert!(!demand.wants_buzzer());
    }

    #[test]
    fn should_detect_rising_route_for_actuator() {
        let previous = Predicates {
            door_open: true,
            ..Predicates::default()
        };
        let current = Predicates {
            door_open: true,
            low_light: true,
            ..Predicates::default()
        };
        let demand = gate(&current, AUTO_HOME, &toggles());
        assert!(demand.has_rising(Actuator::Light, &current, &previous));
        assert!(!demand.has_rising(Actuator::Buzzer, &current, &previous));
    }
}
