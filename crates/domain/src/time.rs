//! Time and timestamp helpers.
//!
//! Every instant in the system is UTC; dwell comparisons never mix zones.

use chrono::{DateTime, TimeDelta, Utc};

/// UTC timestamp used for activation instants, snapshot times, log rows, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Time elapsed from `since` to `now`, zero when `since` lies in the future.
#[must_use]
pub fn elapsed(since: Timestamp, now: Timestamp) -> TimeDelta {
    let delta = now - since;
    if delta < TimeDelta::zero() {
        TimeDelta::zero()
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_clamp_negative_elapsed_to_zero() {
        let t = now();
        assert_eq!(elapsed(t + TimeDelta::seconds(5), t), TimeDelta::zero());
        assert_eq!(elapsed(t, t + TimeDelta::seconds(5)), TimeDelta::seconds(5));
    }
}
