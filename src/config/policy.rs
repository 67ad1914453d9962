//! Validation policy settings

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::study_session::{
    ValidationPolicy, DEFAULT_DURATION_MISMATCH_TOLERANCE_MINUTES, DEFAULT_FUTURE_TOLERANCE_SECS,
    DEFAULT_MAX_DURATION_HOURS, DEFAULT_MAX_PAST_DAYS, DEFAULT_MIN_DURATION_MINUTES,
};

/// One day of clock skew.
pub const MAX_FUTURE_TOLERANCE_SECS: i64 = 86_400;
/// Ten years of backdating.
pub const MAX_PAST_DAYS: i64 = 3_650;
/// One year per session.
pub const MAX_DURATION_HOURS: i64 = 8_760;

/// Tunable limits for the interval checks. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Clock-skew allowance for timestamps past "now"
    #[serde(default = "default_future_tolerance_secs")]
    pub future_tolerance_secs: i64,

    /// Backdating window for newly logged sessions
    #[serde(default = "default_max_past_days")]
    pub max_past_days: i64,

    #[serde(default = "default_max_duration_hours")]
    pub max_duration_hours: i64,

    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: i64,

    /// Allowed gap between declared and computed minutes
    #[serde(default = "default_mismatch_tolerance")]
    pub duration_mismatch_tolerance_minutes: i64,
}

impl PolicyConfig {
    /// Domain policy built from these settings.
    pub fn to_policy(&self) -> Result<ValidationPolicy, ValidationError> {
        let future_tolerance = Duration::try_seconds(self.future_tolerance_secs).ok_or(
            ValidationError::ValueTooLarge("policy.future_tolerance_secs", MAX_FUTURE_TOLERANCE_SECS),
        )?;
        let max_past_age = Duration::try_days(self.max_past_days)
            .ok_or(ValidationError::ValueTooLarge("policy.max_past_days", MAX_PAST_DAYS))?;
        let min_duration = Duration::try_minutes(self.min_duration_minutes).ok_or(
            ValidationError::ValueTooLarge(
                "policy.min_duration_minutes",
                MAX_DURATION_HOURS * 60,
            ),
        )?;
        let max_duration = Duration::try_hours(self.max_duration_hours).ok_or(
            ValidationError::ValueTooLarge("policy.max_duration_hours", MAX_DURATION_HOURS),
        )?;

        Ok(ValidationPolicy::default()
            .with_future_tolerance(future_tolerance)
            .with_max_past_age(max_past_age)
            .with_duration_bounds(min_duration, max_duration)
            .with_mismatch_tolerance_minutes(self.duration_mismatch_tolerance_minutes))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let non_negative = [
            ("policy.future_tolerance_secs", self.future_tolerance_secs),
            ("policy.max_past_days", self.max_past_days),
            ("policy.max_duration_hours", self.max_duration_hours),
            ("policy.min_duration_minutes", self.min_duration_minutes),
            (
                "policy.duration_mismatch_tolerance_minutes",
                self.duration_mismatch_tolerance_minutes,
            ),
        ];
        if let Some((name, _)) = non_negative.iter().find(|(_, value)| *value < 0) {
            return Err(ValidationError::NegativeValue(*name));
        }

        // Timestamps shifted by these limits must stay representable
        let upper_bounds = [
            (
                "policy.future_tolerance_secs",
                self.future_tolerance_secs,
                MAX_FUTURE_TOLERANCE_SECS,
            ),
            ("policy.max_past_days", self.max_past_days, MAX_PAST_DAYS),
            (
                "policy.max_duration_hours",
                self.max_duration_hours,
                MAX_DURATION_HOURS,
            ),
            (
                "policy.duration_mismatch_tolerance_minutes",
                self.duration_mismatch_tolerance_minutes,
                self.max_duration_hours.saturating_mul(60),
            ),
        ];
        if let Some((name, _, max)) = upper_bounds
            .iter()
            .find(|(_, value, max)| *value > *max)
        {
            return Err(ValidationError::ValueTooLarge(*name, *max));
        }

        if self.min_duration_minutes >= self.max_duration_hours * 60 {
            return Err(ValidationError::InvalidDurationBounds);
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            future_tolerance_secs: default_future_tolerance_secs(),
            max_past_days: default_max_past_days(),
            max_duration_hours: default_max_duration_hours(),
            min_duration_minutes: default_min_duration_minutes(),
            duration_mismatch_tolerance_minutes: default_mismatch_tolerance(),
        }
    }
}

fn default_future_tolerance_secs() -> i64 {
    DEFAULT_FUTURE_TOLERANCE_SECS
}

fn default_max_past_days() -> i64 {
    DEFAULT_MAX_PAST_DAYS
}

fn default_max_duration_hours() -> i64 {
    DEFAULT_MAX_DURATION_HOURS
}

fn default_min_duration_minutes() -> i64 {
    DEFAULT_MIN_DURATION_MINUTES
}

fn default_mismatch_tolerance() -> i64 {
    DEFAULT_DURATION_MISMATCH_TOLERANCE_MINUTES
}
