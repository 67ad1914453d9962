//! DeleteStudySessionHandler - Command handler for removing a session.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{OwnedByUser, StudySessionId, UserId};
use crate::domain::study_session::SessionError;
use crate::ports::StudySessionRepository;

/// Command to delete a study session.
#[derive(Debug, Clone)]
pub struct DeleteStudySessionCommand {
    pub caller: UserId,
    pub session_id: StudySessionId,
}

/// Handler for deleting study sessions.
pub struct DeleteStudySessionHandler {
    repository: Arc<dyn StudySessionRepository>,
}

impl DeleteStudySessionHandler {
    pub fn new(repository: Arc<dyn StudySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteStudySessionCommand) -> Result<(), SessionError> {
        let session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;
        session.check_ownership(&cmd.caller)?;

        self.repository.delete(&cmd.session_id).await?;

        info!(session_id = %cmd.session_id, owner_id = %cmd.caller, "Study session deleted");
        Ok(())
    }
}
