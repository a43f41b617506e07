//! Time keeping for the watch face

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};

/// Source of the current wall-clock time, in UTC.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Timestamp outside of the range chrono can represent
    OutOfRange,
}

/// Wall-clock time pinned to a point of monotonic uptime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Uptime at which `time` was valid, in milliseconds
    uptime_ms: u64,
}

impl TimeReference {
    /// Create new time reference from a datetime valid at `uptime_ms`
    pub fn from_datetime(time: NaiveDateTime, uptime_ms: u64) -> Self {
        Self { time, uptime_ms }
    }

    /// Create new time reference from seconds since the Unix epoch
    pub fn from_timestamp(secs: i64, uptime_ms: u64) -> Result<Self, Error> {
        let time = DateTime::from_timestamp(secs, 0)
            .ok_or(Error::OutOfRange)?
            .naive_utc();
        Ok(Self::from_datetime(time, uptime_ms))
    }
}

/// Keeps the wall clock by extrapolating from the last time reference.
#[derive(Debug, Default)]
pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Wall-clock time at the given uptime
    ///
    /// Uptimes before the reference point or too far past it fall back to
    /// the reference time itself.
    pub fn time_at(&self, uptime_ms: u64) -> NaiveDateTime {
        let elapsed = uptime_ms.saturating_sub(self.reference.uptime_ms);
        i64::try_from(elapsed)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| self.reference.time.checked_add_signed(delta))
            .unwrap_or(self.reference.time)
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        debug!("Time reference updated");
        self.reference = reference;
    }
}

#[cfg(feature = "pinetime")]
impl Clock for TimeManager {
    fn now(&self) -> NaiveDateTime {
        self.time_at(embassy_time::Instant::now().as_millis())
    }
}

/// Convert a UTC time to local wall time.
pub fn to_local(utc: NaiveDateTime, offset: FixedOffset) -> NaiveDateTime {
    utc.and_utc().with_timezone(&offset).naive_local()
}
