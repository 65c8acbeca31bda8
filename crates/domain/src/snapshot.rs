//! Sensor snapshots, one per validated telemetry upload.
//!
//! A snapshot is immutable once built. Only the most recent one drives
//! decisions; older ones are kept for history queries.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Upper bound of the 12-bit ADC channels (air quality, ambient light).
pub const ADC_MAX: i64 = 4095;

/// A validated reading of every sensor channel at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub pir_motion: bool,
    pub flame_detected: bool,
    /// Normalized door state, `true` means open.
    pub door_open: bool,
    /// Gas sensor ADC value in `[0, 4095]`.
    pub air_quality: i64,
    pub sound_level: i64,
    /// Photoresistor ADC value in `[0, 4095]`; higher is darker.
    pub light_level: i64,
    pub temperature: f64,
    /// Relative humidity in `[0, 100]`.
    pub humidity: f64,
    pub observed_at: Timestamp,
}

impl SensorSnapshot {
    /// A snapshot where no channel asserts anything.
    ///
    /// Used when nothing has been uploaded yet.
    #[must_use]
    pub fn inactive(observed_at: Timestamp) -> Self {
        Self {
            pir_motion: false,
            flame_detected: false,
            door_open: false,
            air_quality: 0,
            sound_level: 0,
            light_level: 0,
            temperature: 0.0,
            humidity: 0.0,
            observed_at,
        }
    }

    /// Clamp every numeric field into its physical range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.air_quality = self.air_quality.clamp(0, ADC_MAX);
        self.light_level = self.light_level.clamp(0, ADC_MAX);
        self.sound_level = self.sound_level.max(0);
        self.humidity = if self.humidity.is_nan() {
            0.0
        } else {
            self.humidity.clamp(0.0, 100.0)
        };
        if !self.temperature.is_finite() {
            self.temperature = 0.0;
        }
        self
    }

    /// Air quality expressed as a percentage of the ADC range.
    #[must_use]
    pub fn air_quality_percent(&self) -> u8 {
        if self.air_quality <= 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.air_quality as f64 / ADC_MAX as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
        percent
    }

    /// Human-readable air quality band.
    #[must_use]
    pub fn air_quality_status(&self) -> AirQualityStatus {
        match self.air_quality {
            ..1000 => AirQualityStatus::Excellent,
            1000..2000 => AirQualityStatus::Good,
            2000..3000 => AirQualityStatus::Moderate,
            3000..4000 => AirQualityStatus::Poor,
            _ => AirQualityStatus::VeryPoor,
        }
    }
}

/// Coarse air quality band shown to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirQualityStatus {
    Excellent,
    Good,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_clamp_out_of_range_fields() {
        let mut snapshot = SensorSnapshot::inactive(now());
        snapshot.air_quality = 9000;
        snapshot.light_level = -4;
        snapshot.sound_level = -10;
        snapshot.humidity = 140.0;

        let clamped = snapshot.clamped();
        assert_eq!(clamped.air_quality, 4095);
        assert_eq!(clamped.light_level, 0);
        assert_eq!(clamped.sound_level, 0);
        assert!((clamped.humidity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_replace_nan_humidity_with_zero() {
        let mut snapshot = SensorSnapshot::inactive(now());
        snapshot.humidity = f64::NAN;
        assert!(snapshot.clamped().humidity.abs() < f64::EPSILON);
    }

    #[test]
    fn should_map_air_quality_to_percent() {
        let mut snapshot = SensorSnapshot::inactive(now());
        assert_eq!(snapshot.air_quality_percent(), 0);
        snapshot.air_quality = 4095;
        assert_eq!(snapshot.air_quality_percent(), 100);
        snapshot.air_quality = 2048;
        assert_eq!(snapshot.air_quality_percent(), 50);
    }

    #[test]
    fn should_band_air_quality_status() {
        let mut snapshot = SensorSnapshot::inactive(now());
        snapshot.air_quality = 999;
        assert_eq!(snapshot.air_quality_status(), AirQualityStatus::Excellent);
        snapshot.air_quality = 2000;
        assert_eq!(snapshot.air_quality_status(), AirQualityStatus::Moderate);
        snapshot.air_quality = 4000;
        assert_eq!(snapshot.air_quality_status(), AirQualityStatus::VeryPoor);
    }
}
