//! Single-deadline timer for executor-driven hosts
//!
//! The watch face keeps at most one frame timer alive, so one deadline is
//! enough. The host's event loop waits for [`DeadlineTimer::deadline`] and
//! hands the expired token back to the face.

use embassy_time::{Duration, Instant};

use super::host::TimerToken;
use crate::trace;

#[derive(Debug, Default)]
pub struct DeadlineTimer {
    pending: Option<(TimerToken, Instant)>,
    next_token: u32,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any earlier deadline.
    pub fn post(&mut self, now: Instant, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        if let Some((old, _)) = self.pending {
            trace!("Deadline {} replaced by {}", old.0, token.0);
        }
        self.pending = Some((token, now + delay));
        token
    }

    pub fn cancel(&mut self, token: TimerToken) {
        if matches!(self.pending, Some((pending, _)) if pending == token) {
            self.pending = None;
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Take the token if its deadline has passed.
    pub fn expired(&mut self, now: Instant) -> Option<TimerToken> {
        match self.pending {
            Some((token, at)) if at <= now => {
                self.pending = None;
                Some(token)
            }
            _ => None,
        }
    }
}
