//! Study session domain module.
//!
//! Validation of user-reported study sessions: structural checks on a
//! single interval, overlap rules between intervals of the same owner,
//! and the committed session record.
//!
//! # Policy profiles
//!
//! - `ValidationMode::Create` - rejects sessions starting more than the
//!   backdating window before now
//! - `ValidationMode::Update` - skips the backdating check so old
//!   sessions can be corrected

mod aggregate;
mod errors;
mod interval;
mod overlap;
mod policy;
mod structure;

pub use aggregate::StudySession;
pub use errors::{SessionError, SessionValidationError, ValidationErrorKind};
pub use interval::{
    OwnerRef, SessionInterval, SessionIntervalBuilder, ValidatedInterval, ValidationMode,
};
pub use overlap::{find_conflicts, ranges_overlap, SessionSpan};
pub use policy::{
    ValidationPolicy, DEFAULT_DURATION_MISMATCH_TOLERANCE_MINUTES, DEFAULT_FUTURE_TOLERANCE_SECS,
    DEFAULT_MAX_DURATION_HOURS, DEFAULT_MAX_PAST_DAYS, DEFAULT_MIN_DURATION_MINUTES,
};
pub use structure::{calculate_duration_minutes, check_structure};
