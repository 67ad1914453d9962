//! ListStudySessionsHandler - Query handler for the caller's sessions.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::study_session::{SessionError, StudySession};
use crate::ports::StudySessionRepository;

/// Query for every session of the caller, most recent first.
#[derive(Debug, Clone)]
pub struct ListStudySessionsQuery {
    pub caller: UserId,
}

pub struct ListStudySessionsHandler {
    repository: Arc<dyn StudySessionRepository>,
}

impl ListStudySessionsHandler {
    pub fn new(repository: Arc<dyn StudySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListStudySessionsQuery,
    ) -> Result<Vec<StudySession>, SessionError> {
        Ok(self.repository.find_by_user_id(&query.caller).await?)
    }
}
