//! Shared test setup for the study session handlers.

use std::sync::Arc;

use crate::adapters::clock::FixedClock;
use crate::adapters::memory::{InMemoryStudySessionRepository, InMemoryUserDirectory};
use crate::application::StudySessionValidator;
use crate::domain::foundation::{StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{StudySession, ValidatedInterval, ValidationPolicy};
use crate::ports::StudySessionRepository;

pub(super) fn now() -> Timestamp {
    Timestamp::parse_rfc3339("2025-11-29T12:00:00Z").unwrap()
}

pub(super) fn at(hhmm: &str) -> Timestamp {
    Timestamp::parse_rfc3339(&format!("2025-11-29T{}:00Z", hhmm)).unwrap()
}

pub(super) fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub(super) struct Harness {
    pub repository: Arc<InMemoryStudySessionRepository>,
    pub validator: Arc<StudySessionValidator>,
}

/// Fixed clock at noon, users `alice` and `bob`, empty store.
pub(super) fn harness() -> Harness {
    harness_with(Arc::new(InMemoryStudySessionRepository::new()))
}

pub(super) fn harness_with(repository: Arc<InMemoryStudySessionRepository>) -> Harness {
    let users = Arc::new(InMemoryUserDirectory::with_users([user("alice"), user("bob")]));
    let validator = Arc::new(StudySessionValidator::new(
        Arc::new(FixedClock::new(now())),
        repository.clone(),
        users,
        ValidationPolicy::default(),
    ));
    Harness {
        repository,
        validator,
    }
}

impl Harness {
    pub fn store(&self) -> Arc<dyn StudySessionRepository> {
        self.repository.clone()
    }

    /// Inserts a session directly, bypassing validation.
    pub async fn seed(&self, owner: &str, start: &str, end: &str) -> StudySession {
        let start = at(start);
        let end = at(end);
        let session = StudySession::new(
            StudySessionId::new(),
            ValidatedInterval {
                owner_id: user(owner),
                id: None,
                start,
                end,
                duration_minutes: end.duration_since(&start).num_minutes(),
            },
            now().minus_days(1),
        );
        self.repository.insert_unchecked(session.clone()).await;
        session
    }
}
