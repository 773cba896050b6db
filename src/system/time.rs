//! Time keeping for hosts without a wall clock

use chrono::{FixedOffset, NaiveDateTime, TimeDelta};
use embassy_time::Instant;
use heapless::Vec;

use super::host::SubscriptionToken;
use crate::{debug, warn};

const MAX_SUBSCRIBERS: usize = 2;

/// Wall-clock time observed at a known uptime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: NaiveDateTime::UNIX_EPOCH,
            instant: Instant::from_ticks(0),
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UTC date and time
    pub fn from_datetime(time: NaiveDateTime, instant: Instant) -> Self {
        Self { time, instant }
    }

    /// Create new time reference from a Unix timestamp in seconds
    pub fn from_timestamp(seconds: i64, instant: Instant) -> Self {
        let time = chrono::DateTime::from_timestamp(seconds, 0)
            .map(|t| t.naive_utc())
            .unwrap_or(NaiveDateTime::UNIX_EPOCH);
        Self { time, instant }
    }
}

/// Extrapolates wall-clock time from a reference and keeps the time zone
/// plus its change subscribers.
#[derive(Debug)]
pub struct TimeManager {
    reference: TimeReference,
    zone: FixedOffset,
    subscribers: Vec<SubscriptionToken, MAX_SUBSCRIBERS>,
    next_token: u32,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, zone: FixedOffset) -> Self {
        Self {
            reference,
            zone,
            subscribers: Vec::new(),
            next_token: 0,
        }
    }

    /// Current UTC time at uptime `now`
    pub fn get_time(&self, now: Instant) -> NaiveDateTime {
        let elapsed = now
            .checked_duration_since(self.reference.instant)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);
        self.reference
            .time
            .checked_add_signed(TimeDelta::microseconds(elapsed))
            .unwrap_or(self.reference.time)
    }

    /// Milliseconds since the Unix epoch at uptime `now`
    pub fn now_millis(&self, now: Instant) -> i64 {
        self.get_time(now).and_utc().timestamp_millis()
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.zone
    }

    /// Switch zones. Returns whether subscribers must be told.
    pub fn set_time_zone(&mut self, zone: FixedOffset) -> bool {
        if zone == self.zone {
            return false;
        }
        debug!("Time zone offset {} s", zone.local_minus_utc());
        self.zone = zone;
        !self.subscribers.is_empty()
    }

    pub fn subscribe(&mut self) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        if self.subscribers.push(token).is_err() {
            warn!("Too many time zone subscribers, {} not recorded", token.0);
        }
        token
    }

    pub fn unsubscribe(&mut self, token: SubscriptionToken) {
        self.subscribers.retain(|t| *t != token);
    }

    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }
}
