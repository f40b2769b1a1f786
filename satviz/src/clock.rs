use crate::units::{Time, Timestamp};
use std::time::{Duration, Instant};

/// Query time for the frame loop.
///
/// Advances by real elapsed time only. Fast-forward is the propagator's
/// time scale, applied to time since each object's epoch.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    pub session_start: Timestamp,
    pub timestamp: Timestamp,
    pub frame: u64,
    pub relative_time: Time,
    pub real_time_start: Instant,
    pub real_time: Duration,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(Timestamp::now())
    }
}

impl PlaybackClock {
    pub fn new(session_start: Timestamp) -> Self {
        PlaybackClock {
            session_start,
            timestamp: session_start,
            frame: 0,
            relative_time: Time::from_secs(0.0),
            real_time_start: Instant::now(),
            real_time: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, real_dt: Time) -> Timestamp {
        self.frame += 1;
        self.relative_time += real_dt;
        self.timestamp = self.session_start + self.relative_time;
        self.real_time = Instant::now().duration_since(self.real_time_start);
        self.timestamp
    }
}
