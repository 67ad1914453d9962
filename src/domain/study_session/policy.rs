//! Tunable limits applied by the structural interval checks.

use chrono::Duration;

/// Allowed clock skew between caller and server.
pub const DEFAULT_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Oldest start accepted when a session is newly logged.
pub const DEFAULT_MAX_PAST_DAYS: i64 = 30;

/// Longest session that can be recorded.
pub const DEFAULT_MAX_DURATION_HOURS: i64 = 24;

/// Shortest session that can be recorded.
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 1;

/// Rounding slack between a declared duration and the computed one.
pub const DEFAULT_DURATION_MISMATCH_TOLERANCE_MINUTES: i64 = 1;

/// Limits used by [`check_structure`](super::check_structure).
///
/// `Default` yields the production values; deployments may override
/// them through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// How far past "now" a start or end may lie.
    pub future_tolerance: Duration,
    /// How far before "now" a newly logged session may start.
    pub max_past_age: Duration,
    /// Upper bound on `end - start` (inclusive).
    pub max_duration: Duration,
    /// Lower bound on `end - start` (inclusive).
    pub min_duration: Duration,
    /// Maximum absolute difference between declared and computed minutes.
    pub duration_mismatch_tolerance_minutes: i64,
}

impl ValidationPolicy {
    /// Builder: override the clock-skew tolerance.
    pub fn with_future_tolerance(mut self, tolerance: Duration) -> Self {
        self.future_tolerance = tolerance;
        self
    }

    /// Builder: override the backdating window for newly logged sessions.
    pub fn with_max_past_age(mut self, age: Duration) -> Self {
        self.max_past_age = age;
        self
    }

    /// Builder: override the duration bounds.
    pub fn with_duration_bounds(mut self, min: Duration, max: Duration) -> Self {
        self.min_duration = min;
        self.max_duration = max;
        self
    }

    /// Builder: override the declared-duration rounding slack.
    pub fn with_mismatch_tolerance_minutes(mut self, minutes: i64) -> Self {
        self.duration_mismatch_tolerance_minutes = minutes;
        self
    }

    /// Minimum duration expressed in whole minutes.
    pub fn min_duration_minutes(&self) -> i64 {
        self.min_duration.num_minutes()
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            future_tolerance: Duration::seconds(DEFAULT_FUTURE_TOLERANCE_SECS),
            max_past_age: Duration::days(DEFAULT_MAX_PAST_DAYS),
            max_duration: Duration::hours(DEFAULT_MAX_DURATION_HOURS),
            min_duration: Duration::minutes(DEFAULT_MIN_DURATION_MINUTES),
            duration_mismatch_tolerance_minutes: DEFAULT_DURATION_MISMATCH_TOLERANCE_MINUTES,
        }
    }
}
