//! Sensor toggle registry: per-channel light and buzzer enables.
//!
//! Channels are addressed on the wire by the human-readable sensor names the
//! field hardware uses. A missing entry reads as the channel default.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A sensor channel that can participate in automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    Motion,
    Flame,
    AirQuality,
    Door,
    Sound,
    AmbientLight,
    Climate,
}

impl Channel {
    pub const ALL: [Self; 7] = [
        Self::Motion,
        Self::Flame,
        Self::AirQuality,
        Self::Door,
        Self::Sound,
        Self::AmbientLight,
        Self::Climate,
    ];

    /// Name used by the sensor board and the operator UI.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Motion => "PIR Motion Sensor",
            Self::Flame => "Flame Sensor",
            Self::AirQuality => "MQ135 Air Quality Sensor",
            Self::Door => "Reed Switch (Door Sensor)",
            Self::Sound => "Sound Sensor",
            Self::AmbientLight => "LDR Light Sensor",
            Self::Climate => "DHT11 Temperature & Humidity",
        }
    }

    /// Toggle values used when nothing has been configured.
    #[must_use]
    pub fn default_toggle(self) -> SensorToggle {
        match self {
            Self::Climate => SensorToggle {
                light_enabled: false,
                buzzer_enabled: false,
            },
            Self::AmbientLight => SensorToggle {
                light_enabled: true,
                buzzer_enabled: false,
            },
            _ => SensorToggle::default(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Channel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.display_name() == s)
            .ok_or_else(|| ValidationError::UnknownChannel(s.to_string()))
    }
}

/// One of the two shared actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actuator {
    Light,
    Buzzer,
}

impl fmt::Display for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Buzzer => f.write_str("buzzer"),
        }
    }
}

impl FromStr for Actuator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "buzzer" => Ok(Self::Buzzer),
            other => Err(ValidationError::UnknownActuator(other.to_string())),
        }
    }
}

/// Whether a channel may drive each actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorToggle {
    pub light_enabled: bool,
    pub buzzer_enabled: bool,
}

impl Default for SensorToggle {
    fn default() -> Self {
        Self {
            light_enabled: true,
            buzzer_enabled: true,
        }
    }
}

impl SensorToggle {
    #[must_use]
    pub fn allows(&self, actuator: Actuator) -> bool {
        match actuator {
            Actuator::Light => self.light_enabled,
            Actuator::Buzzer => self.buzzer_enabled,
        }
    }
}

/// Toggle values for every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorToggles {
    entries: BTreeMap<Channel, SensorToggle>,
}

impl SensorToggles {
    /// Registry with every channel at its default.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            entries: Channel::ALL
                .into_iter()
                .map(|channel| (channel, channel.default_toggle()))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, channel: Channel) -> SensorToggle {
        self.entries
            .get(&channel)
            .copied()
            .unwrap_or_else(|| channel.default_toggle())
    }

    #[must_use]
    pub fn allows(&self, channel: Channel, actuator: Actuator) -> bool {
        self.get(channel).allows(actuator)
    }

    pub fn set(&mut self, channel: Channel, actuator: Actuator, enabled: bool) {
        let mut toggle = self.get(channel);
        match actuator {
            Actuator::Light => toggle.light_enabled = enabled,
            Actuator::Buzzer => toggle.buzzer_enabled = enabled,
        }
        self.entries.insert(channel, toggle);
    }

    pub fn insert(&mut self, channel: Channel, toggle: SensorToggle) {
        self.entries.insert(channel, toggle);
    }

    /// Every channel with its effective toggle, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, SensorToggle)> + '_ {
        Channel::ALL
            .into_iter()
            .map(|channel| (channel, self.get(channel)))
    }
}

impl FromIterator<(Channel, SensorToggle)> for SensorToggles {
    fn from_iter<I: IntoIterator<Item = (Channel, SensorToggle)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
