//! In-memory implementation of StudySessionRepository.
//!
//! Suitable for tests and single-process development. Optionally
//! enforces non-overlap at write time, mimicking a database exclusion
//! constraint.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{SessionSpan, StudySession};
use crate::ports::StudySessionRepository;

/// In-memory session store keyed by session id.
#[derive(Debug, Default)]
pub struct InMemoryStudySessionRepository {
    sessions: RwLock<HashMap<StudySessionId, StudySession>>,
    exclusion_guard: bool,
}

impl InMemoryStudySessionRepository {
    /// Creates an empty store without a write-time overlap guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects overlapping writes.
    pub fn with_exclusion_guard() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            exclusion_guard: true,
        }
    }

    /// Seeds the store, bypassing validation and the guard.
    pub async fn insert_unchecked(&self, session: StudySession) {
        self.sessions.write().await.insert(*session.id(), session);
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn first_conflict(
        sessions: &HashMap<StudySessionId, StudySession>,
        candidate: &StudySession,
    ) -> Option<StudySessionId> {
        sessions
            .values()
            .filter(|s| s.id() != candidate.id() && s.user_id() == candidate.user_id())
            .find(|s| s.span().overlaps(candidate.start_at(), candidate.end_at()))
            .map(|s| *s.id())
    }

    fn overlap_error(conflicting: StudySessionId) -> DomainError {
        DomainError::new(
            ErrorCode::SessionOverlap,
            "Study session overlaps an existing session",
        )
        .with_detail("conflicting_id", conflicting.to_string())
    }
}

#[async_trait]
impl StudySessionRepository for InMemoryStudySessionRepository {
    async fn query_intersecting(
        &self,
        user_id: &UserId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<SessionSpan>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.user_id() == user_id)
            .map(StudySession::span)
            .filter(|span| span.overlaps(start, end))
            .collect())
    }

    async fn find_by_id(&self, id: &StudySessionId) -> Result<Option<StudySession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save(&self, session: &StudySession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if self.exclusion_guard {
            if let Some(conflicting) = Self::first_conflict(&sessions, session) {
                return Err(Self::overlap_error(conflicting));
            }
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &StudySession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::StudySessionNotFound,
                format!("Study session not found: {}", session.id()),
            )
            .with_detail("session_id", session.id().to_string()));
        }
        if self.exclusion_guard {
            if let Some(conflicting) = Self::first_conflict(&sessions, session) {
                return Err(Self::overlap_error(conflicting));
            }
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &StudySessionId) -> Result<(), DomainError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::StudySessionNotFound,
                format!("Study session not found: {}", id),
            )
            .with_detail("session_id", id.to_string())),
        }
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<StudySession>, DomainError> {
        let mut sessions: Vec<StudySession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.start_at().cmp(a.start_at()));
        Ok(sessions)
    }
}
