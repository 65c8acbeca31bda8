//! Timer registry: activation instant and dwell class per actuator.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::threshold::Predicates;
use crate::time::{Timestamp, elapsed};
use crate::toggle::Actuator;

/// Determines the minimum on-duration of an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutClass {
    Motion,
    Other,
}

impl TimeoutClass {
    /// Class of an activation caused by the given predicates.
    ///
    /// Motion wins only when no other-class condition is present.
    #[must_use]
    pub fn classify(p: &Predicates) -> Self {
        if p.motion && !p.other_class() {
            Self::Motion
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn dwell(self, actuator: Actuator) -> TimeDelta {
        match (self, actuator) {
            (Self::Motion, Actuator::Light) => TimeDelta::seconds(60),
            _ => TimeDelta::seconds(10),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for TimeoutClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "motion" => Ok(Self::Motion),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown timeout class: {other}")),
        }
    }
}

/// When and why an actuator was switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub at: Timestamp,
    pub class: TimeoutClass,
}

impl Activation {
    #[must_use]
    pub fn new(at: Timestamp, class: TimeoutClass) -> Self {
        Self { at, class }
    }

    /// Whether the minimum on-duration has passed at `now`.
    #[must_use]
    pub fn dwell_elapsed(&self, actuator: Actuator, now: Timestamp) -> bool {
        elapsed(self.at, now) >= self.class.dwell(actuator)
    }
}
