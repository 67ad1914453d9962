//! EditStudySessionHandler - Command handler for replacing a session's range.

use std::sync::Arc;

use tracing::{debug, info};

use super::with_filled_duration;
use crate::application::StudySessionValidator;
use crate::domain::foundation::{OwnedByUser, UserId};
use crate::domain::study_session::{
    SessionError, SessionInterval, SessionValidationError, StudySession,
};
use crate::ports::StudySessionRepository;

/// Command to edit an existing study session.
#[derive(Debug, Clone)]
pub struct EditStudySessionCommand {
    pub caller: UserId,
    /// Must carry the id of the session being edited.
    pub interval: SessionInterval,
}

/// Result of a successful edit.
#[derive(Debug, Clone)]
pub struct EditStudySessionResult {
    pub session: StudySession,
}

/// Handler for editing study sessions.
pub struct EditStudySessionHandler {
    validator: Arc<StudySessionValidator>,
    repository: Arc<dyn StudySessionRepository>,
}

impl EditStudySessionHandler {
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
        cmd: EditStudySessionCommand,
    ) -> Result<EditStudySessionResult, SessionError> {
        let session_id = *cmd
            .interval
            .id()
            .ok_or_else(SessionValidationError::id_required)?;
        debug!(session_id = %session_id, owner_id = %cmd.caller, "Editing study session");

        // 1. Load and authorize under the owner's lock, so the write
        //    replaces the record as it stands now
        let guard = self.validator.lock_owner(&cmd.caller).await;
        let session = self
            .repository
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(session_id))?;
        session.check_ownership(&cmd.caller)?;

        // 2. Re-validate with self-exclusion and write
        let interval = with_filled_duration(cmd.interval);
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
            owner_id = %session.user_id(),
            duration_minutes = session.duration_minutes(),
            "Study session edited"
        );

        Ok(EditStudySessionResult { session })
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{at, harness, now, user};
    use super::*;
    use crate::domain::foundation::StudySessionId;
    use crate::domain::study_session::ValidationErrorKind;

    fn edit(caller: &str, id: StudySessionId, start: &str, end: &str) -> EditStudySessionCommand {
        EditStudySessionCommand {
            caller: user(caller),
            interval: SessionInterval::builder()
                .id(id)
                .start(at(start))
                .end(at(end))
                .build(),
        }
    }

    #[tokio::test]
    async fn extends_session_without_conflicting_with_itself() {
        let h = harness();
        let existing = h.seed("alice", "10:00", "11:00").await;
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());

        let result = handler
            .handle(edit("alice", *existing.id(), "10:00", "11:30"))
            .await
            .unwrap();

        assert_eq!(result.session.id(), existing.id());
        assert_eq!(result.session.end_at(), &at("11:30"));
        assert_eq!(result.session.duration_minutes(), 90);
        assert_eq!(result.session.updated_at(), &now());
        assert_eq!(result.session.created_at(), existing.created_at());
    }

    #[tokio::test]
    async fn missing_id_is_rejected_before_lookup() {
        let h = harness();
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());
        let cmd = EditStudySessionCommand {
            caller: user("alice"),
            interval: SessionInterval::builder().start(at("10:00")).end(at("11:00")).build(),
        };

        let err = handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::IdRequired));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let h = harness();
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());
        let id = StudySessionId::new();

        let err = handler.handle(edit("alice", id, "10:00", "11:00")).await.unwrap_err();

        assert_eq!(err, SessionError::NotFound(id));
    }

    #[tokio::test]
    async fn other_users_session_is_forbidden() {
        let h = harness();
        let existing = h.seed("bob", "10:00", "11:00").await;
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());

        let err = handler
            .handle(edit("alice", *existing.id(), "10:00", "11:30"))
            .await
            .unwrap_err();

        assert_eq!(err, SessionError::Forbidden);
        let unchanged = h.repository.find_by_id(existing.id()).await.unwrap().unwrap();
        assert_eq!(unchanged.end_at(), &at("11:00"));
    }

    #[tokio::test]
    async fn edit_into_another_session_is_overlap() {
        let h = harness();
        let existing = h.seed("alice", "10:00", "11:00").await;
        h.seed("alice", "11:15", "11:45").await;
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());

        let err = handler
            .handle(edit("alice", *existing.id(), "10:00", "11:30"))
            .await
            .unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::SessionOverlap));
    }

    #[tokio::test]
    async fn old_sessions_can_be_corrected() {
        let h = harness();
        let start = now().minus_days(40);
        let existing = h.seed("alice", "10:00", "11:00").await;
        let handler = EditStudySessionHandler::new(h.validator.clone(), h.store());
        let cmd = EditStudySessionCommand {
            caller: user("alice"),
            interval: SessionInterval::builder()
                .id(*existing.id())
                .start(start)
                .end(start.plus_minutes(30))
                .build(),
        };

        let result = handler.handle(cmd).await.unwrap();

        assert_eq!(result.session.start_at(), &start);
        assert_eq!(result.session.duration_minutes(), 30);
    }
}
