//! Session validation service.
//!
//! Composes the structural checks, the user directory and the overlap
//! query into the create and update entry points. The service also owns
//! the per-owner serialization point: `commit_create` and
//! `commit_update` hold the owner's lock from the overlap query until
//! the caller's write has finished.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use super::owner_locks::{OwnerGuard, OwnerLocks};
use crate::domain::foundation::{DomainError, StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{
    check_structure, find_conflicts, SessionError, SessionInterval, SessionSpan,
    SessionValidationError, ValidatedInterval, ValidationErrorKind, ValidationMode,
    ValidationPolicy,
};
use crate::ports::{Clock, StudySessionRepository, UserDirectory};

/// Validates study session intervals against the rules and the store.
pub struct StudySessionValidator {
    clock: Arc<dyn Clock>,
    repository: Arc<dyn StudySessionRepository>,
    users: Arc<dyn UserDirectory>,
    policy: ValidationPolicy,
    locks: OwnerLocks,
}

impl StudySessionValidator {
    pub fn new(
        clock: Arc<dyn Clock>,
        repository: Arc<dyn StudySessionRepository>,
        users: Arc<dyn UserDirectory>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            clock,
            repository,
            users,
            policy,
            locks: OwnerLocks::new(),
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Current instant as seen by the rules.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Validates a newly logged session. Persists nothing.
    pub async fn validate_for_create(
        &self,
        interval: &SessionInterval,
    ) -> Result<ValidatedInterval, SessionError> {
        self.validate(interval, ValidationMode::Create).await
    }

    /// Validates an edit of an existing session, ignoring its own stored range.
    pub async fn validate_for_update(
        &self,
        interval: &SessionInterval,
    ) -> Result<ValidatedInterval, SessionError> {
        self.validate(interval, ValidationMode::Update).await
    }

    /// Ids of the owner's sessions intersecting `[start, end)`, minus `exclude`.
    pub async fn find_overlaps(
        &self,
        owner_id: &UserId,
        start: &Timestamp,
        end: &Timestamp,
        exclude: Option<&StudySessionId>,
    ) -> Result<Vec<StudySessionId>, DomainError> {
        Ok(self
            .conflicting_spans(owner_id, start, end, exclude)
            .await?
            .into_iter()
            .map(|span| span.id)
            .collect())
    }

    /// Validates in create mode and runs `write` under the owner's lock.
    pub async fn commit_create<F, Fut, T>(
        &self,
        interval: &SessionInterval,
        write: F,
    ) -> Result<T, SessionError>
    where
        F: FnOnce(ValidatedInterval) -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        self.commit(interval, ValidationMode::Create, write).await
    }

    /// Validates in update mode and runs `write` under the owner's lock.
    pub async fn commit_update<F, Fut, T>(
        &self,
        interval: &SessionInterval,
        write: F,
    ) -> Result<T, SessionError>
    where
        F: FnOnce(ValidatedInterval) -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        self.commit(interval, ValidationMode::Update, write).await
    }

    /// Takes `owner_id`'s lock for callers that read before committing.
    pub async fn lock_owner(&self, owner_id: &UserId) -> OwnerGuard {
        self.locks.acquire(owner_id).await
    }

    /// `commit_update` for a caller already holding the owner's lock.
    /// The interval is attributed to the guard's owner.
    pub async fn commit_update_locked<F, Fut, T>(
        &self,
        guard: &OwnerGuard,
        interval: &SessionInterval,
        write: F,
    ) -> Result<T, SessionError>
    where
        F: FnOnce(ValidatedInterval) -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        let interval = interval.with_owner(guard.owner().clone());
        self.validate_and_write(&interval, ValidationMode::Update, write)
            .await
    }

    async fn commit<F, Fut, T>(
        &self,
        interval: &SessionInterval,
        mode: ValidationMode,
        write: F,
    ) -> Result<T, SessionError>
    where
        F: FnOnce(ValidatedInterval) -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        // Without an owner id validation fails before any write, so no lock.
        let _guard = match interval.owner_id() {
            Some(owner_id) => Some(self.locks.acquire(owner_id).await),
            None => None,
        };

        self.validate_and_write(interval, mode, write).await
    }

    async fn validate_and_write<F, Fut, T>(
        &self,
        interval: &SessionInterval,
        mode: ValidationMode,
        write: F,
    ) -> Result<T, SessionError>
    where
        F: FnOnce(ValidatedInterval) -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        let validated = self.validate(interval, mode).await?;
        let owner_id = validated.owner_id.clone();

        write(validated).await.map_err(|err| {
            let err = SessionError::from(err);
            if err.validation_kind() == Some(ValidationErrorKind::SessionOverlap) {
                warn!(owner_id = %owner_id, "Store rejected overlapping study session at commit");
            }
            err
        })
    }

    async fn validate(
        &self,
        interval: &SessionInterval,
        mode: ValidationMode,
    ) -> Result<ValidatedInterval, SessionError> {
        let now = self.clock.now();
        debug!(?mode, owner_id = ?interval.owner_id(), "Validating study session interval");

        check_structure(interval, &now, mode, &self.policy)?;

        let owner_id = self.check_owner(interval).await?;

        let start = *interval
            .start()
            .ok_or_else(SessionValidationError::start_required)?;
        let end = *interval
            .end()
            .ok_or_else(SessionValidationError::end_required)?;

        let exclude = match mode {
            ValidationMode::Create => None,
            ValidationMode::Update => interval.id(),
        };
        let conflicts = self.conflicting_spans(&owner_id, &start, &end, exclude).await?;
        if let Some(first) = conflicts.first() {
            debug!(
                owner_id = %owner_id,
                conflicting_id = %first.id,
                conflicts = conflicts.len(),
                "Study session interval overlaps existing sessions"
            );
            return Err(
                SessionValidationError::session_overlap(first.id, &first.start, &first.end).into(),
            );
        }

        let duration_minutes = interval
            .declared_duration_minutes()
            .unwrap_or_else(|| end.duration_since(&start).num_minutes());

        Ok(ValidatedInterval {
            owner_id,
            id: interval.id().copied(),
            start,
            end,
            duration_minutes,
        })
    }

    async fn check_owner(&self, interval: &SessionInterval) -> Result<UserId, SessionError> {
        let owner = interval
            .owner()
            .ok_or_else(SessionValidationError::user_required)?;
        let owner_id = owner
            .id
            .as_ref()
            .ok_or_else(SessionValidationError::user_id_required)?;

        if !self.users.exists(owner_id).await? {
            return Err(SessionValidationError::user_not_found(owner_id).into());
        }

        Ok(owner_id.clone())
    }

    async fn conflicting_spans(
        &self,
        owner_id: &UserId,
        start: &Timestamp,
        end: &Timestamp,
        exclude: Option<&StudySessionId>,
    ) -> Result<Vec<SessionSpan>, DomainError> {
        let candidates = self
            .repository
            .query_intersecting(owner_id, start, end)
            .await?;
        Ok(find_conflicts(&candidates, start, end, exclude))
    }
}
