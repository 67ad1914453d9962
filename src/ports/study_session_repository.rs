//! Study session repository port (the session store).
//!
//! Defines the contract for persisting study sessions and for the
//! owner-scoped range query the overlap check depends on.
//!
//! # Design
//!
//! - **Store-side filtering**: `query_intersecting` must filter by owner
//!   and range in the store (e.g. an index on `(user_id, start_at, end_at)`),
//!   never by scanning every session.
//! - **Commit-time guard**: implementations that can enforce
//!   non-overlap at write time (e.g. a PostgreSQL exclusion constraint)
//!   report a rejected write as `ErrorCode::SessionOverlap` with a
//!   `conflicting_id` detail when known.

use crate::domain::foundation::{DomainError, StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{SessionSpan, StudySession};
use async_trait::async_trait;

/// Repository port for study session persistence.
#[async_trait]
pub trait StudySessionRepository: Send + Sync {
    /// Spans owned by `user_id` that intersect `[start, end)`.
    ///
    /// Intersection uses strict inequalities: `span.start < end && span.end > start`.
    async fn query_intersecting(
        &self,
        user_id: &UserId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<SessionSpan>, DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &StudySessionId) -> Result<Option<StudySession>, DomainError>;

    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `SessionOverlap` if the store's own guard rejects the range
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &StudySession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `StudySessionNotFound` if session doesn't exist
    /// - `SessionOverlap` if the store's own guard rejects the range
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &StudySession) -> Result<(), DomainError>;

    /// Delete a session.
    ///
    /// # Errors
    ///
    /// - `StudySessionNotFound` if session doesn't exist
    async fn delete(&self, id: &StudySessionId) -> Result<(), DomainError>;

    /// All sessions of a user, most recent start first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<StudySession>, DomainError>;
}
