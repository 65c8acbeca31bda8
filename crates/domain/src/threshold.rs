//! Threshold classifier: raw readings become one boolean predicate per channel.

use serde::{Deserialize, Serialize};

use crate::snapshot::SensorSnapshot;

/// Air quality ADC value above which a gas leak is assumed.
pub const AIR_QUALITY_THRESHOLD: i64 = 2000;
/// Sound level above which a loud noise is reported.
pub const SOUND_THRESHOLD: i64 = 200;
/// Photoresistor ADC value above which it is considered dark.
pub const LIGHT_THRESHOLD: i64 = 2000;

/// The classified state of every channel at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Predicates {
    pub fire: bool,
    pub gas_leak: bool,
    pub loud_noise: bool,
    pub motion: bool,
    pub door_open: bool,
    pub low_light: bool,
}

impl Predicates {
    /// Classify a snapshot. All comparisons are strict.
    #[must_use]
    pub fn classify(snapshot: &SensorSnapshot) -> Self {
        Self {
            fire: snapshot.flame_detected,
            gas_leak: snapshot.air_quality > AIR_QUALITY_THRESHOLD,
            loud_noise: snapshot.sound_level > SOUND_THRESHOLD,
            motion: snapshot.pir_motion,
            door_open: snapshot.door_open,
            low_light: snapshot.light_level > LIGHT_THRESHOLD,
        }
    }

    /// Any condition that activates with the short, shared dwell.
    #[must_use]
    pub fn other_class(&self) -> bool {
        self.fire || self.gas_leak || self.loud_noise || self.door_open
    }

    /// Predicates asserted now that were not asserted in `previous`.
    #[must_use]
    pub fn rising_since(&self, previous: &Self) -> Self {
        Self {
            fire: self.fire && !previous.fire,
            gas_leak: self.gas_leak && !previous.gas_leak,
            loud_noise: self.loud_noise && !previous.loud_noise,
            motion: self.motion && !previous.motion,
            door_open: self.door_open && !previous.door_open,
            low_light: self.low_light && !previous.low_light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    fn snapshot() -> SensorSnapshot {
        SensorSnapshot::inactive(now())
    }

    #[test]
    fn should_classify_inactive_snapshot_as_all_false() {
        assert_eq!(Predicates::classify(&snapshot()), Predicates::default());
    }

    #[test]
    fn should_not_assert_gas_leak_when_exactly_at_threshold() {
        let mut s = snapshot();
        s.air_quality = 2000;
        assert!(!Predicates::classify(&s).gas_leak);
        s.air_quality = 2001;
        assert!(Predicates::classify(&s).gas_leak);
    }

    #[test]
    fn should_not_assert_loud_noise_when_exactly_at_threshold() {
        let mut s = snapshot();
        s.sound_level = 200;
        assert!(!Predicates::classify(&s).loud_noise);
        s.sound_level = 201;
        assert!(Predicates::classify(&s).loud_noise);
    }

    #[test]
    fn should_assert_low_light_when_darker_than_threshold() {
        let mut s = snapshot();
        s.light_level = 2000;
        assert!(!Predicates::classify(&s).low_light);
        s.light_level = 3500;
        assert!(Predicates::classify(&s).low_light);
    }

    #[test]
    fn should_pass_boolean_channels_through() {
        let mut s = snapshot();
        s.flame_detected = true;
        s.pir_motion = true;
        s.door_open = true;
        let p = Predicates::classify(&s);
        assert!(p.fire && p.motion && p.door_open);
        assert!(p.other_class());
    }

    #[test]
    fn should_report_only_new_predicates_as_rising() {
        let previous = Predicates {
            fire: true,
            ..Predicates::default()
        };
        let current = Predicates {
            fire: true,
            motion: true,
            ..Predicates::default()
        };
        let rising = current.rising_since(&previous);
        assert!(!rising.fire);
        assert!(rising.motion);
    }
}
