//! LogStudySessionHandler - Command handler for logging a new study session.

use std::sync::Arc;

use tracing::{debug, info};

use super::with_filled_duration;
use crate::application::StudySessionValidator;
use crate::domain::foundation::{StudySessionId, UserId};
use crate::domain::study_session::{SessionError, SessionInterval, StudySession};
use crate::ports::StudySessionRepository;

/// Command to log a study session for the authenticated caller.
#[derive(Debug, Clone)]
pub struct LogStudySessionCommand {
    pub caller: UserId,
    /// Owner and id supplied here are ignored.
    pub interval: SessionInterval,
}

/// Result of a successfully logged session.
#[derive(Debug, Clone)]
pub struct LogStudySessionResult {
    pub session: StudySession,
}

/// Handler for logging study sessions.
pub struct LogStudySessionHandler {
    validator: Arc<StudySessionValidator>,
    repository: Arc<dyn StudySessionRepository>,
}

impl LogStudySessionHandler {
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
        cmd: LogStudySessionCommand,
    ) -> Result<LogStudySessionResult, SessionError> {
        debug!(owner_id = %cmd.caller, "Logging study session");

        // 1. The caller always owns what they log
        let interval = with_filled_duration(cmd.interval.with_owner(cmd.caller));

        // 2. Validate and save under the owner's lock
        let now = self.validator.now();
        let repository = Arc::clone(&self.repository);
        let session = self
            .validator
            .commit_create(&interval, move |validated| async move {
                let session = StudySession::new(StudySessionId::new(), validated, now);
                repository.save(&session).await?;
                Ok(session)
            })
            .await?;

        info!(
            session_id = %session.id(),
            owner_id = %session.user_id(),
            duration_minutes = session.duration_minutes(),
            "Study session logged"
        );

        Ok(LogStudySessionResult { session })
    }
}
