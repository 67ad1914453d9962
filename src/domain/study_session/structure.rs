//! Structural checks on a single interval. Pure, no I/O.
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. start present
//! 2. start not past `now + tolerance`
//! 3. start not older than the backdating window (create mode only)
//! 4. end present
//! 5. end not past `now + tolerance`
//! 6. end strictly after start
//! 7. duration within the maximum
//! 8. declared duration, if any, at least the minimum and within rounding
//!    slack of the computed one
//! 9. computed duration at least the minimum

use super::errors::SessionValidationError;
use super::interval::{SessionInterval, ValidationMode};
use super::policy::ValidationPolicy;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Checks the interval's shape against `now` under the given mode.
pub fn check_structure(
    interval: &SessionInterval,
    now: &Timestamp,
    mode: ValidationMode,
    policy: &ValidationPolicy,
) -> Result<(), SessionValidationError> {
    let latest_allowed = now.plus(policy.future_tolerance);

    let start = interval
        .start()
        .ok_or_else(SessionValidationError::start_required)?;

    if start.is_after(&latest_allowed) {
        return Err(SessionValidationError::start_in_future());
    }

    if mode == ValidationMode::Create {
        let oldest_allowed = now.minus(policy.max_past_age);
        if start.is_before(&oldest_allowed) {
            return Err(SessionValidationError::start_too_old(
                policy.max_past_age.num_days(),
            ));
        }
    }

    let end = interval
        .end()
        .ok_or_else(SessionValidationError::end_required)?;

    if end.is_after(&latest_allowed) {
        return Err(SessionValidationError::end_in_future());
    }

    if !end.is_after(start) {
        return Err(SessionValidationError::end_before_start());
    }

    let duration = end.duration_since(start);
    if duration > policy.max_duration {
        return Err(SessionValidationError::duration_too_long(
            policy.max_duration.num_hours(),
        ));
    }

    let computed_minutes = duration.num_minutes();
    if let Some(declared) = interval.declared_duration_minutes() {
        if declared < policy.min_duration_minutes() {
            return Err(SessionValidationError::duration_too_short(
                policy.min_duration_minutes(),
            ));
        }
        if (declared - computed_minutes).abs() > policy.duration_mismatch_tolerance_minutes {
            return Err(SessionValidationError::duration_mismatch(
                declared,
                computed_minutes,
            ));
        }
    }

    if duration < policy.min_duration {
        return Err(SessionValidationError::duration_too_short(
            policy.min_duration_minutes(),
        ));
    }

    Ok(())
}

/// Whole minutes between `start` and `end`, truncated.
///
/// # Errors
///
/// - `EmptyField` if either bound is missing
/// - `InvalidFormat` if `end` is before `start`
pub fn calculate_duration_minutes(
    start: Option<&Timestamp>,
    end: Option<&Timestamp>,
) -> Result<i64, ValidationError> {
    let start = start.ok_or_else(|| ValidationError::empty_field("start_at"))?;
    let end = end.ok_or_else(|| ValidationError::empty_field("end_at"))?;

    if end.is_before(start) {
        return Err(ValidationError::invalid_format(
            "end_at",
            "end time must be after start time",
        ));
    }

    Ok(end.duration_since(start).num_minutes())
}
