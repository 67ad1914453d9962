//! GetStudySessionHandler - Query handler for a single session.

use std::sync::Arc;

use crate::domain::foundation::{StudySessionId, UserId};
use crate::domain::study_session::{SessionError, StudySession};
use crate::ports::StudySessionRepository;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetStudySessionQuery {
    pub caller: UserId,
    pub session_id: StudySessionId,
}

/// Handler for retrieving a session owned by the caller.
pub struct GetStudySessionHandler {
    repository: Arc<dyn StudySessionRepository>,
}

impl GetStudySessionHandler {
    pub fn new(repository: Arc<dyn StudySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetStudySessionQuery) -> Result<StudySession, SessionError> {
        let session = self
            .repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;

        if session.user_id() != &query.caller {
            return Err(SessionError::forbidden());
        }

        Ok(session)
    }
}
