//! Persisted study session record.
//!
//! Created only from a [`ValidatedInterval`]; the store owns it afterwards.

use serde::{Deserialize, Serialize};

use super::interval::{SessionInterval, ValidatedInterval};
use super::overlap::SessionSpan;
use crate::domain::foundation::{OwnedByUser, StudySessionId, Timestamp, UserId};

/// A committed study session.
///
/// # Invariants
///
/// - `start_at < end_at`
/// - no other session of the same user intersects `[start_at, end_at)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    id: StudySessionId,
    user_id: UserId,
    start_at: Timestamp,
    end_at: Timestamp,
    duration_minutes: i64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl StudySession {
    /// Creates a new record from a validated interval.
    pub fn new(id: StudySessionId, interval: ValidatedInterval, now: Timestamp) -> Self {
        Self {
            id,
            user_id: interval.owner_id,
            start_at: interval.start,
            end_at: interval.end,
            duration_minutes: interval.duration_minutes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: StudySessionId,
        user_id: UserId,
        start_at: Timestamp,
        end_at: Timestamp,
        duration_minutes: i64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            start_at,
            end_at,
            duration_minutes,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &StudySessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn start_at(&self) -> &Timestamp {
        &self.start_at
    }

    pub fn end_at(&self) -> &Timestamp {
        &self.end_at
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The stored range, as used by overlap checks.
    pub fn span(&self) -> SessionSpan {
        SessionSpan::new(self.id, self.start_at, self.end_at)
    }

    /// This session moved to new bounds, for re-validation. The duration
    /// is left undeclared so it is recomputed from the bounds.
    pub fn adjusted_interval(&self, start: Timestamp, end: Timestamp) -> SessionInterval {
        SessionInterval::builder()
            .owner(self.user_id.clone())
            .id(self.id)
            .start(start)
            .end(end)
            .build()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the range with a re-validated one. Ownership never changes.
    pub fn reschedule(&mut self, interval: ValidatedInterval, now: Timestamp) {
        self.start_at = interval.start;
        self.end_at = interval.end;
        self.duration_minutes = interval.duration_minutes;
        self.updated_at = now;
    }
}

impl OwnedByUser for StudySession {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
