use std::{
    ops::{Add, Sub},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Wall clock instant as fractional seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Sub<Timestamp> for Timestamp {
    type Output = f64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_secs_f64())
    }
}

impl Timestamp {
    pub fn now() -> Self {
        let now = Utc::now();
        Self(now.timestamp_micros() as f64 / 1_000_000.0)
    }

    pub const fn from_seconds(secs: f64) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> f64 {
        self.0
    }

    /// Seconds elapsed between `self` and `now`.
    pub fn age(&self, now: Timestamp) -> f64 {
        now - *self
    }

    /// True while the age is strictly below the window.
    pub fn is_fresh(&self, now: Timestamp, window: Duration) -> bool {
        self.age(now) < window.as_secs_f64()
    }
}

/// Source of "now" for anything that stamps or ages records.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self(AtomicU64::new(start.as_seconds().to_bits()))
    }

    pub fn set(&self, now: Timestamp) {
        self.0.store(now.as_seconds().to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.set(self.now() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(f64::from_bits(self.0.load(Ordering::SeqCst)))
    }
}

/// Whole minutes, never rounded down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(u32);

impl From<u32> for Minutes {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Minutes {
    /// Rounds a duration in seconds up to the next whole minute.
    /// Negative or non finite input has no meaningful travel time.
    pub fn ceil_from_seconds(secs: f64) -> Option<Self> {
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let minutes = (secs / 60.0).ceil();
        if minutes > u32::MAX as f64 {
            return None;
        }
        Some(Self(minutes as u32))
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }
}

#[test]
fn freshness_boundary_test() {
    let stamp = Timestamp::from_seconds(1_000.0);
    let window = Duration::from_secs(120);
    assert!(stamp.is_fresh(Timestamp::from_seconds(1_119.9), window));
    assert!(!stamp.is_fresh(Timestamp::from_seconds(1_120.0), window));
}

#[test]
fn manual_clock_test() {
    let clock = ManualClock::new(Timestamp::from_seconds(10.0));
    clock.advance(Duration::from_secs(5));
    assert_eq!(clock.now(), Timestamp::from_seconds(15.0));
}

#[test]
fn minutes_ceil_test() {
    assert_eq!(Minutes::ceil_from_seconds(0.0), Some(Minutes(0)));
    assert_eq!(Minutes::ceil_from_seconds(59.5), Some(Minutes(1)));
    assert_eq!(Minutes::ceil_from_seconds(-1.0), None);
    assert_eq!(Minutes::ceil_from_seconds(f64::NAN), None);
}
