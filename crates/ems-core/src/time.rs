//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `SimTime` counter of
//! **milliseconds** since the run epoch.  The mapping to wall-clock time is
//! held in `SimClock`:
//!
//!   unix_millis = start_unix_secs * 1000 + sim_time
//!
//! Using an integer as the canonical time unit means event ordering is exact
//! (no floating-point drift) and comparisons are O(1).  Unlike a fixed-step
//! tick loop, the clock jumps straight to the next event; millisecond
//! resolution keeps closely spaced Poisson arrivals distinct.

use std::fmt;
use std::time::Duration;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp (milliseconds since the run epoch).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * 1_000)
    }

    #[inline]
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: SimTime) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// The timestamp one millisecond later: the smallest strictly later time.
    #[inline]
    pub fn next_instant(self) -> SimTime {
        SimTime(self.0.saturating_add(1))
    }
}

/// Whole milliseconds in `d`, clamped to `u64::MAX`.
#[inline]
fn clamped_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Saturates at `u64::MAX` milliseconds.
impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_add(clamped_millis(rhs)))
    }
}

impl std::ops::AddAssign<Duration> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: SimTime) -> Duration {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}.{:03}s", self.0 / 1_000, self.0 % 1_000)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps `SimTime` to Unix wall-clock time and tracks the current instant.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of `SimTime::ZERO`.
    pub start_unix_secs: i64,
    /// The current instant, advanced by [`SimClock::advance_to`].
    pub now: SimTime,
}

impl SimClock {
    pub fn new(start_unix_secs: i64) -> Self {
        Self { start_unix_secs, now: SimTime::ZERO }
    }

    /// Jump the clock forward to `time`.  Never moves backwards.
    #[inline]
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.now, "clock moved backwards: {time} < {}", self.now);
        self.now = self.now.max(time);
    }

    /// Unix timestamp in milliseconds corresponding to `time`.
    #[inline]
    pub fn unix_millis(&self, time: SimTime) -> i64 {
        self.start_unix_secs * 1_000 + time.0 as i64
    }

    /// The `SimTime` of a Unix millisecond timestamp, or `None` if it precedes
    /// the run epoch.
    pub fn sim_time_of_unix_millis(&self, unix_millis: i64) -> Option<SimTime> {
        let offset = unix_millis - self.start_unix_secs * 1_000;
        u64::try_from(offset).ok().map(SimTime)
    }

    /// Break `time` into (day, hour, minute) components from the run start.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_dhm(time: SimTime) -> (u64, u32, u32) {
        let total_secs = time.0 / 1_000;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = Self::elapsed_dhm(self.now);
        write!(f, "{} (day {} {:02}:{:02})", self.now, d, h, m)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Unix timestamp of `SimTime::ZERO`.
    pub start_unix_secs: i64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Stop processing at this time (duration budget).  `None` runs until the
    /// case source is exhausted and all in-flight cases have finished.
    pub end_time: Option<SimTime>,

    /// Stop accepting arrivals after this many cases (case quota).
    pub max_cases: Option<usize>,

    /// Primary coverage radius in seconds of travel time (r1).
    pub primary_radius_secs: u64,

    /// Secondary coverage radius in seconds of travel time (r2 ≥ r1).
    pub secondary_radius_secs: u64,
}

impl SimConfig {
    pub fn primary_radius(&self) -> Duration {
        Duration::from_secs(self.primary_radius_secs)
    }

    pub fn secondary_radius(&self) -> Duration {
        Duration::from_secs(self.secondary_radius_secs)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs)
    }
}

impl Default for SimConfig {
    /// 10-minute primary and 14-minute secondary radius, unbounded run.
    fn default() -> Self {
        Self {
            start_unix_secs:       0,
            seed:                  0,
            end_time:              None,
            max_cases:             None,
            primary_radius_secs:   600,
            secondary_radius_secs: 840,
        }
    }
}
