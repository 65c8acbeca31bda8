//! Hub events broadcast to live subscribers after each successful cycle.

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorState;
use crate::effect::{LogEntry, Notification};
use crate::mode::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubEvent {
    ActuatorsChanged { actuators: ActuatorState, mode: Mode },
    LogRecorded(LogEntry),
    Notified(Notification),
}

impl HubEvent {
    /// Short name used as the SSE event type.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActuatorsChanged { .. } => "actuators_changed",
            Self::LogRecorded(_) => "log_recorded",
            Self::Notified(_) => "notified",
        }
    }
}
