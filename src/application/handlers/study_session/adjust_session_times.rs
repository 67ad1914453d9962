//! AdjustSessionTimesHandler - Command handler for moving one or both bounds.
//!
//! Bounds left out of the command keep their stored value. When nothing
//! actually changes the session is returned as is, without validation
//! or a write.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::StudySessionValidator;
use crate::domain::foundation::{OwnedByUser, StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{SessionError, StudySession};
use crate::ports::StudySessionRepository;

/// Command to adjust the start and/or end of a session.
#[derive(Debug, Clone)]
pub struct AdjustSessionTimesCommand {
    pub caller: UserId,
    pub session_id: StudySessionId,
    pub start_at: Option<Timestamp>,
    pub end_at: Option<Timestamp>,
}

/// Result of an adjustment.
#[derive(Debug, Clone)]
pub struct AdjustSessionTimesResult {
    pub session: StudySession,
    /// False when the requested bounds matched the stored ones.
    pub changed: bool,
}

/// Handler for partial time adjustments.
pub struct AdjustSessionTimesHandler {
    validator: Arc<StudySessionValidator>,
    repository: Arc<dyn StudySessionRepository>,
}

impl AdjustSessionTimesHandler {
    pub fn new(
        validator: Arc<StudySessionValidator>,
        repository: Arc<dyn StudySessionRepository>,
    ) -> Self {
        Self {
            validator,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: AdjustSessionTimesCommand,
    ) -> Result<AdjustSessionTimesResult, SessionError> {
        debug!(session_id = %cmd.session_id, owner_id = %cmd.caller, "Adjusting study session times");

        let guard = self.validator.lock_owner(&cmd.caller).await;
        let session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.check_ownership(&cmd.caller)?;

        // Missing bounds are merged from the record read under the lock
        let start = cmd.start_at.unwrap_or(*session.start_at());
        let end = cmd.end_at.unwrap_or(*session.end_at());
        if start == *session.start_at() && end == *session.end_at() {
            return Ok(AdjustSessionTimesResult {
                session,
                changed: false,
            });
        }

        let interval = session.adjusted_interval(start, end);
        let now = self.validator.now();
        let repository = Arc::clone(&self.repository);
        let session = self
            .validator
            .commit_update_locked(&guard, &interval, move |validated| async move {
                let mut session = session;
                session.reschedule(validated, now);
                repository.update(&session).await?;
                Ok(session)
            })
            .await?;
        drop(guard);

        info!(
            session_id = %session.id(),
            duration_minutes = session.duration_minutes(),
            "Study session times adjusted"
        );

        Ok(AdjustSessionTimesResult {
            session,
            changed: true,
        })
    }
}
