//! Telemetry decode: the single place where loosely-typed uploads become
//! a [`SensorSnapshot`].
//!
//! Sensor boards send every field as whatever their firmware happened to
//! produce: JSON booleans, numbers, or strings such as `"true"` and `"1234"`.
//! Decoding never fails. Missing or unreadable fields fall back to an
//! inactive value, and numeric fields are clamped into range.

use chrono::DateTime;
use serde_json::Value;

use crate::snapshot::SensorSnapshot;
use crate::time::Timestamp;

/// Decode a raw upload body into a validated snapshot.
///
/// The reed switch reports `true` while the magnet is near, i.e. while the
/// door is *closed*, so a readable `door_open` is inverted here. A missing or
/// unreadable reed field decodes as closed. A positive epoch `timestamp`
/// field becomes `observed_at`; otherwise `received_at` is used.
#[must_use]
pub fn decode(body: &Value, received_at: Timestamp) -> SensorSnapshot {
    let door_open = field_opt_bool(body, "door_open").is_some_and(|reed_closed| !reed_closed);
    let observed_at = field_int(body, "timestamp")
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(received_at);

    SensorSnapshot {
        pir_motion: field_bool(body, "pir_motion"),
        flame_detected: field_bool(body, "flame_detected"),
        door_open,
        air_quality: field_int(body, "air_quality").unwrap_or(0),
        sound_level: field_int(body, "sound_level").unwrap_or(0),
        light_level: field_int(body, "light_level").unwrap_or(0),
        temperature: field_float(body, "temperature").unwrap_or(0.0),
        humidity: field_float(body, "humidity").unwrap_or(0.0),
        observed_at,
    }
    .clamped()
}

fn field_bool(body: &Value, key: &str) -> bool {
    field_opt_bool(body, key).unwrap_or(false)
}

fn field_opt_bool(body: &Value, key: &str) -> Option<bool> {
    match body.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn field_int(body: &Value, key: &str) -> Option<i64> {
    match body.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(float_to_int)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite()).map(float_to_int))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn field_float(body: &Value, key: &str) -> Option<f64> {
    match body.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_int(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;
    use serde_json::json;

    #[test]
    fn should_decode_typed_json_body() {
        let received = now();
        let body = json!({
            "pir_motion": true,
            "flame_detected": false,
            "door_open": true,
            "air_quality": 1200,
            "sound_level": 40,
            "light_level": 3000,
            "temperature": 21.5,
            "humidity": 48.0
        });

        let snapshot = decode(&body, received);
        assert!(snapshot.pir_motion);
        assert!(!snapshot.flame_detected);
        assert!(!snapshot.door_open);
        assert_eq!(snapshot.air_quality, 1200);
        assert_eq!(snapshot.light_level, 3000);
        assert_eq!(snapshot.observed_at, received);
    }

    #[test]
    fn should_coerce_string_fields() {
        let body = json!({
            "pir_motion": "True",
            "flame_detected": "true",
            "door_open": "false",
            "air_quality": "2500",
            "sound_level": "250.7",
            "temperature": "19.25"
        });

        let snapshot = decode(&body, now());
        assert!(snapshot.pir_motion);
        assert!(snapshot.flame_detected);
        assert!(snapshot.door_open);
        assert_eq!(snapshot.air_quality, 2500);
        assert_eq!(snapshot.sound_level, 250);
        assert!((snapshot.temperature - 19.25).abs() < f64::EPSILON);
    }

    #[test]
    fn should_default_missing_and_malformed_fields_to_inactive() {
        let body = json!({
            "pir_motion": null,
            "air_quality": "lots",
            "humidity": [1, 2]
        });

        let snapshot = decode(&body, now());
        assert!(!snapshot.pir_motion);
        assert!(!snapshot.flame_detected);
        assert_eq!(snapshot.air_quality, 0);
        assert!(snapshot.humidity.abs() < f64::EPSILON);
    }

    #[test]
    fn should_treat_missing_reed_switch_as_closed_door() {
        let snapshot = decode(&json!({"pir_motion": false, "air_quality": 100}), now());
        assert!(!snapshot.door_open);
    }

    #[test]
    fn should_treat_unreadable_reed_switch_as_closed_door() {
        for reed in [json!("closed"), json!(null), json!([true]), json!({"on": false})] {
            let snapshot = decode(&json!({ "door_open": reed }), now());
            assert!(!snapshot.door_open, "decoded {reed} as open");
        }
    }

    #[test]
    fn should_open_door_when_reed_switch_reads_false() {
        for reed in [json!(false), json!(0), json!("false"), json!("0")] {
            let snapshot = decode(&json!({ "door_open": reed }), now());
            assert!(snapshot.door_open, "decoded {reed} as closed");
        }
    }

    #[test]
    fn should_clamp_humidity_into_range() {
        let snapshot = decode(&json!({"humidity": 130.0}), now());
        assert!((snapshot.humidity - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_use_epoch_timestamp_when_positive() {
        let snapshot = decode(&json!({"timestamp": 1_700_000_000}), now());
        assert_eq!(snapshot.observed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn should_use_received_time_when_timestamp_is_zero() {
        let received = now();
        let snapshot = decode(&json!({"timestamp": 0}), received);
        assert_eq!(snapshot.observed_at, received);
    }
}
