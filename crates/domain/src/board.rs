//! Sensor board settings served to the telemetry board on each poll.

use serde::{Deserialize, Serialize};

pub const MIN_UPLOAD_INTERVAL_MS: i64 = 1000;
pub const MAX_UPLOAD_INTERVAL_MS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorBoardSettings {
    pub monitoring: bool,
    pub encryption_enabled: bool,
    /// Always within `[1000, 10000]`.
    pub upload_interval_ms: i64,
}

impl Default for SensorBoardSettings {
    fn default() -> Self {
        Self {
            monitoring: false,
            encryption_enabled: true,
            upload_interval_ms: 2000,
        }
    }
}

impl SensorBoardSettings {
    /// Set the upload interval, clamped into the supported range.
    pub fn set_upload_interval(&mut self, interval_ms: i64) -> i64 {
        self.upload_interval_ms = interval_ms.clamp(MIN_UPLOAD_INTERVAL_MS, MAX_UPLOAD_INTERVAL_MS);
        self.upload_interval_ms
    }
}
