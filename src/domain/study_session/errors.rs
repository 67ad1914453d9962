//! Study session error types.
//!
//! Two layers:
//!
//! - [`SessionValidationError`] - a rejected interval. Always a caller
//!   mistake; carries the failed rule, a user-facing message and the
//!   offending field.
//! - [`SessionError`] - what command and query handlers return. Wraps a
//!   validation failure or reports not-found, forbidden and
//!   infrastructure problems.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, StudySessionId, Timestamp, UserId};

/// The rule an interval violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    StartRequired,
    StartInFuture,
    /// Create mode only.
    StartTooOld,
    EndRequired,
    EndInFuture,
    EndBeforeStart,
    DurationTooLong,
    DurationTooShort,
    DurationMismatch,
    UserRequired,
    UserIdRequired,
    UserNotFound,
    SessionOverlap,
    /// Edit submitted without the session's id.
    IdRequired,
}

impl ValidationErrorKind {
    /// Stable machine-readable key, suitable for client-side i18n lookups.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationErrorKind::StartRequired => "startatnull",
            ValidationErrorKind::StartInFuture => "startatfuture",
            ValidationErrorKind::StartTooOld => "startattooold",
            ValidationErrorKind::EndRequired => "endatnull",
            ValidationErrorKind::EndInFuture => "endatfuture",
            ValidationErrorKind::EndBeforeStart => "endatbeforestart",
            ValidationErrorKind::DurationTooLong => "durationtoolong",
            ValidationErrorKind::DurationTooShort => "durationtooshort",
            ValidationErrorKind::DurationMismatch => "durationmismatch",
            ValidationErrorKind::UserRequired => "appusernull",
            ValidationErrorKind::UserIdRequired => "useridnull",
            ValidationErrorKind::UserNotFound => "usernotfound",
            ValidationErrorKind::SessionOverlap => "sessionoverlap",
            ValidationErrorKind::IdRequired => "idnull",
        }
    }

    /// Input field the rule is about.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationErrorKind::StartRequired
            | ValidationErrorKind::StartInFuture
            | ValidationErrorKind::StartTooOld => "start_at",
            ValidationErrorKind::EndRequired
            | ValidationErrorKind::EndInFuture
            | ValidationErrorKind::EndBeforeStart
            | ValidationErrorKind::DurationTooLong => "end_at",
            ValidationErrorKind::DurationTooShort | ValidationErrorKind::DurationMismatch => {
                "duration_minutes"
            }
            ValidationErrorKind::UserRequired
            | ValidationErrorKind::UserIdRequired
            | ValidationErrorKind::UserNotFound => "owner",
            ValidationErrorKind::SessionOverlap => "start_at",
            ValidationErrorKind::IdRequired => "id",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A rejected study session interval.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct SessionValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// One of the sessions the interval collides with (overlap only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting_session: Option<StudySessionId>,
}

impl SessionValidationError {
    /// Creates an error for `kind` using its default field.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: Some(kind.field().to_string()),
            conflicting_session: None,
        }
    }

    pub fn start_required() -> Self {
        Self::new(ValidationErrorKind::StartRequired, "Start time is required")
    }

    pub fn start_in_future() -> Self {
        Self::new(
            ValidationErrorKind::StartInFuture,
            "Start time cannot be in the future",
        )
    }

    pub fn start_too_old(max_past_days: i64) -> Self {
        Self::new(
            ValidationErrorKind::StartTooOld,
            format!(
                "Start time cannot be more than {} days in the past",
                max_past_days
            ),
        )
    }

    pub fn end_required() -> Self {
        Self::new(ValidationErrorKind::EndRequired, "End time is required")
    }

    pub fn end_in_future() -> Self {
        Self::new(
            ValidationErrorKind::EndInFuture,
            "End time cannot be in the future",
        )
    }

    pub fn end_before_start() -> Self {
        Self::new(
            ValidationErrorKind::EndBeforeStart,
            "End time must be after start time",
        )
    }

    pub fn duration_too_long(max_hours: i64) -> Self {
        Self::new(
            ValidationErrorKind::DurationTooLong,
            format!("Session duration cannot exceed {} hours", max_hours),
        )
    }

    pub fn duration_too_short(min_minutes: i64) -> Self {
        Self::new(
            ValidationErrorKind::DurationTooShort,
            format!("Session duration must be at least {} minute(s)", min_minutes),
        )
    }

    pub fn duration_mismatch(declared: i64, computed: i64) -> Self {
        Self::new(
            ValidationErrorKind::DurationMismatch,
            format!(
                "Duration minutes ({}) does not match the time range ({} minutes)",
                declared, computed
            ),
        )
    }

    pub fn user_required() -> Self {
        Self::new(ValidationErrorKind::UserRequired, "User is required")
    }

    pub fn user_id_required() -> Self {
        Self::new(ValidationErrorKind::UserIdRequired, "User ID is required")
    }

    pub fn id_required() -> Self {
        Self::new(ValidationErrorKind::IdRequired, "Study session ID is required")
    }

    pub fn user_not_found(user_id: &UserId) -> Self {
        Self::new(
            ValidationErrorKind::UserNotFound,
            format!("User with ID {} does not exist", user_id),
        )
    }

    /// Overlap with a known stored range.
    pub fn session_overlap(id: StudySessionId, start: &Timestamp, end: &Timestamp) -> Self {
        Self {
            conflicting_session: Some(id),
            ..Self::new(
                ValidationErrorKind::SessionOverlap,
                format!(
                    "A study session already exists during this time period ({} - {})",
                    start.as_datetime().format("%Y-%m-%d %H:%M"),
                    end.as_datetime().format("%H:%M"),
                ),
            )
        }
    }

    /// Overlap reported by the store at commit time, range unknown.
    pub fn late_overlap(conflicting: Option<StudySessionId>) -> Self {
        Self {
            conflicting_session: conflicting,
            ..Self::new(
                ValidationErrorKind::SessionOverlap,
                "A study session already exists during this time period",
            )
        }
    }

    /// HTTP-class status hint. Every rejection is a caller error.
    pub fn status_hint(&self) -> u16 {
        400
    }
}

/// Errors returned by study session handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The interval broke a validation rule.
    #[error(transparent)]
    Validation(#[from] SessionValidationError),
    /// No session with this id.
    #[error("Study session not found: {0}")]
    NotFound(StudySessionId),
    /// Caller is not the session's owner.
    #[error("Permission denied")]
    Forbidden,
    /// Store, user directory or other collaborator failed.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: StudySessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        SessionError::Forbidden
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    /// Returns the validation kind when this is a validation failure.
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            SessionError::Validation(err) => Some(err.kind),
            _ => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Validation(err) if err.kind == ValidationErrorKind::SessionOverlap => {
                ErrorCode::SessionOverlap
            }
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
            SessionError::NotFound(_) => ErrorCode::StudySessionNotFound,
            SessionError::Forbidden => ErrorCode::Forbidden,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// HTTP-class status hint for the transport layer.
    pub fn status_hint(&self) -> u16 {
        match self {
            SessionError::Validation(err) => err.status_hint(),
            SessionError::NotFound(_) => 404,
            SessionError::Forbidden => 403,
            SessionError::Infrastructure(_) => 500,
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionOverlap => {
                let conflicting = err
                    .detail("conflicting_id")
                    .and_then(|id| id.parse::<StudySessionId>().ok());
                SessionError::Validation(SessionValidationError::late_overlap(conflicting))
            }
            ErrorCode::UserNotFound => match err
                .detail("user_id")
                .and_then(|id| UserId::new(id).ok())
            {
                Some(user_id) => {
                    SessionError::Validation(SessionValidationError::user_not_found(&user_id))
                }
                None => SessionError::infrastructure(err.to_string()),
            },
            ErrorCode::Forbidden => SessionError::Forbidden,
            ErrorCode::StudySessionNotFound => match err
                .detail("session_id")
                .and_then(|id| id.parse::<StudySessionId>().ok())
            {
                Some(id) => SessionError::NotFound(id),
                None => SessionError::infrastructure(err.to_string()),
            },
            _ => SessionError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_distinct_key() {
        use std::collections::HashSet;
        let kinds = [
            ValidationErrorKind::StartRequired,
            ValidationErrorKind::StartInFuture,
            ValidationErrorKind::StartTooOld,
            ValidationErrorKind::EndRequired,
            ValidationErrorKind::EndInFuture,
            ValidationErrorKind::EndBeforeStart,
            ValidationErrorKind::DurationTooLong,
            ValidationErrorKind::DurationTooShort,
            ValidationErrorKind::DurationMismatch,
            ValidationErrorKind::UserRequired,
            ValidationErrorKind::UserIdRequired,
            ValidationErrorKind::UserNotFound,
            ValidationErrorKind::SessionOverlap,
            ValidationErrorKind::IdRequired,
        ];
        let keys: HashSet<_> = kinds.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), kinds.len());
    }

    #[test]
    fn messages_name_the_failed_rule() {
        assert_eq!(
            SessionValidationError::end_before_start().to_string(),
            "End time must be after start time"
        );
        assert_eq!(
            SessionValidationError::start_too_old(30).message,
            "Start time cannot be more than 30 days in the past"
        );
        assert_eq!(
            SessionValidationError::duration_mismatch(30, 90).message,
            "Duration minutes (30) does not match the time range (90 minutes)"
        );
    }

    #[test]
    fn constructors_fill_default_field() {
        let err = SessionValidationError::duration_too_short(1);
        assert_eq!(err.field.as_deref(), Some("duration_minutes"));
        assert_eq!(err.kind, ValidationErrorKind::DurationTooShort);
    }

    #[test]
    fn overlap_message_shows_conflicting_range() {
        let start = Timestamp::parse_rfc3339("2025-11-29T10:00:00Z").unwrap();
        let end = Timestamp::parse_rfc3339("2025-11-29T11:00:00Z").unwrap();
        let id = StudySessionId::new();

        let err = SessionValidationError::session_overlap(id, &start, &end);

        assert!(err.message.contains("10:00 - 11:00"));
        assert_eq!(err.conflicting_session, Some(id));
    }

    #[test]
    fn validation_error_serializes_kind_in_screaming_case() {
        let json = serde_json::to_value(SessionValidationError::end_required()).unwrap();
        assert_eq!(json["kind"], "END_REQUIRED");
        assert_eq!(json["field"], "end_at");
        assert!(json.get("conflicting_session").is_none());
    }

    #[test]
    fn storage_overlap_normalizes_to_validation_overlap() {
        let id = StudySessionId::new();
        let err = DomainError::new(ErrorCode::SessionOverlap, "exclusion violated")
            .with_detail("conflicting_id", id.to_string());

        let session_err: SessionError = err.into();

        assert_eq!(
            session_err.validation_kind(),
            Some(ValidationErrorKind::SessionOverlap)
        );
        match session_err {
            SessionError::Validation(v) => assert_eq!(v.conflicting_session, Some(id)),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn not_found_with_id_maps_to_not_found() {
        let id = StudySessionId::new();
        let err = DomainError::new(ErrorCode::StudySessionNotFound, "gone")
            .with_detail("session_id", id.to_string());

        assert_eq!(SessionError::from(err), SessionError::NotFound(id));
    }

    #[test]
    fn storage_missing_user_maps_to_user_not_found() {
        let err = DomainError::new(ErrorCode::UserNotFound, "fk violated")
            .with_detail("user_id", "ghost");

        assert_eq!(
            SessionError::from(err).validation_kind(),
            Some(ValidationErrorKind::UserNotFound)
        );
    }

    #[test]
    fn database_errors_map_to_infrastructure() {
        let err: SessionError = DomainError::database("connection refused").into();
        assert!(matches!(err, SessionError::Infrastructure(_)));
        assert_eq!(err.status_hint(), 500);
    }

    #[test]
    fn status_hints_follow_error_class() {
        assert_eq!(
            SessionError::from(SessionValidationError::start_required()).status_hint(),
            400
        );
        assert_eq!(SessionError::not_found(StudySessionId::new()).status_hint(), 404);
        assert_eq!(SessionError::forbidden().status_hint(), 403);
    }

    #[test]
    fn overlap_code_is_distinct_from_generic_validation() {
        let overlap = SessionError::from(SessionValidationError::late_overlap(None));
        let other = SessionError::from(SessionValidationError::end_required());

        assert_eq!(overlap.code(), ErrorCode::SessionOverlap);
        assert_eq!(other.code(), ErrorCode::ValidationFailed);
    }
}
