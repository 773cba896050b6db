//! Clock model: wall-clock time to hand rotations

use chrono::{DateTime, FixedOffset, Timelike};

/// Degrees per second (and per minute) on the dial: 360 / 60.
const DEGREES_PER_TICK: f32 = 6.0;
/// Degrees per hour on the dial: 360 / 12.
const DEGREES_PER_HOUR: f32 = 30.0;

/// Absolute rotation of each hand in degrees, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    /// Hand rotations for a local time of day.
    pub fn of<T: Timelike>(time: &T) -> Self {
        // Leap seconds report up to 1999 ms
        let millis = (time.nanosecond() / 1_000_000).min(999);
        let seconds = time.second() as f32 + millis as f32 / 1000.0;
        let minute = time.minute() as f32;

        Self {
            hour: (time.hour() % 12) as f32 * DEGREES_PER_HOUR + minute / 2.0,
            minute: minute * DEGREES_PER_TICK,
            second: seconds * DEGREES_PER_TICK,
        }
    }
}

/// Hand rotations at `now_ms` (milliseconds since the Unix epoch) in `tz`.
pub fn angles_at(now_ms: i64, tz: FixedOffset) -> HandAngles {
    let utc = DateTime::from_timestamp_millis(now_ms).unwrap_or_default();
    HandAngles::of(&utc.with_timezone(&tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const MINUTE_MS: i64 = 60_000;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> HandAngles {
        HandAngles::of(&NaiveTime::from_hms_milli_opt(h, m, s, ms).unwrap())
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn noon_points_straight_up() {
        assert_eq!(at(12, 0, 0, 0), HandAngles::default());
        assert_eq!(at(0, 0, 0, 0), HandAngles::default());
    }

    #[test]
    fn half_past_three() {
        let angles = at(3, 30, 0, 0);
        assert_eq!(angles.hour, 105.0);
        assert_eq!(angles.minute, 180.0);
        assert_eq!(angles.second, 0.0);
    }

    #[test]
    fn second_hand_sweeps_with_milliseconds() {
        assert_eq!(at(0, 0, 0, 500).second, 3.0);
    }

    #[test]
    fn afternoon_uses_twelve_hour_dial() {
        assert_eq!(at(15, 30, 0, 0), at(3, 30, 0, 0));
    }

    #[test]
    fn angles_stay_on_the_dial() {
        let angles = at(23, 59, 59, 999);
        for degrees in [angles.hour, angles.minute, angles.second] {
            assert!((0.0..360.0).contains(&degrees), "{degrees} out of range");
        }
    }

    #[test]
    fn one_minute_later() {
        let start = 1_700_000_012_345;
        let before = angles_at(start, utc());
        let after = angles_at(start + MINUTE_MS, utc());

        let second_delta = (after.second - before.second).rem_euclid(360.0);
        assert!(second_delta.abs() < 1e-3 || (second_delta - 360.0).abs() < 1e-3);
        assert_eq!((after.minute - before.minute).rem_euclid(360.0), 6.0);
    }

    #[test]
    fn time_zone_shifts_hour_hand() {
        // 2023-11-14T22:13:20Z
        let now = 1_700_000_000_000;
        let plus_one = FixedOffset::east_opt(3_600).unwrap();

        let base = angles_at(now, utc());
        let shifted = angles_at(now, plus_one);
        assert_eq!(shifted.minute, base.minute);
        assert_eq!((shifted.hour - base.hour).rem_euclid(360.0), 30.0);
    }

    #[test]
    fn deterministic() {
        assert_eq!(angles_at(42_424_242, utc()), angles_at(42_424_242, utc()));
    }
}
