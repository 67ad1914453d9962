//! The caller-reported interval under validation.
//!
//! A `SessionInterval` is built from caller input and may be incomplete:
//! every bound is optional so that missing values surface as typed
//! validation errors instead of construction failures.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StudySessionId, Timestamp, UserId};

/// Policy profile applied by the structural checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Newly logged session: stale backdating is rejected.
    Create,
    /// Retroactive edit of an existing session.
    Update,
}

/// Reference to the owning user as supplied by the caller.
///
/// The reference itself and its id are both optional so the validator
/// can tell "no user" apart from "user without id".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: Option<UserId>,
}

impl OwnerRef {
    pub fn new(id: UserId) -> Self {
        Self { id: Some(id) }
    }

    /// An owner reference that carries no id.
    pub fn without_id() -> Self {
        Self { id: None }
    }
}

impl From<UserId> for OwnerRef {
    fn from(id: UserId) -> Self {
        Self::new(id)
    }
}

/// Proposed study session range, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionInterval {
    owner: Option<OwnerRef>,
    id: Option<StudySessionId>,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
    declared_duration_minutes: Option<i64>,
}

impl SessionInterval {
    /// Complete interval for a new session.
    pub fn new(owner_id: UserId, start: Timestamp, end: Timestamp) -> Self {
        Self {
            owner: Some(OwnerRef::new(owner_id)),
            id: None,
            start: Some(start),
            end: Some(end),
            declared_duration_minutes: None,
        }
    }

    pub fn builder() -> SessionIntervalBuilder {
        SessionIntervalBuilder::default()
    }

    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_ref()
    }

    /// The owner id, if both the reference and its id are present.
    pub fn owner_id(&self) -> Option<&UserId> {
        self.owner.as_ref().and_then(|o| o.id.as_ref())
    }

    pub fn id(&self) -> Option<&StudySessionId> {
        self.id.as_ref()
    }

    pub fn start(&self) -> Option<&Timestamp> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&Timestamp> {
        self.end.as_ref()
    }

    pub fn declared_duration_minutes(&self) -> Option<i64> {
        self.declared_duration_minutes
    }

    /// Copy with the owner replaced.
    pub fn with_owner(&self, owner_id: UserId) -> Self {
        Self {
            owner: Some(OwnerRef::new(owner_id)),
            ..self.clone()
        }
    }

    /// Copy with the record id replaced.
    pub fn with_id(&self, id: StudySessionId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Copy with the declared duration replaced.
    pub fn with_declared_duration(&self, minutes: i64) -> Self {
        Self {
            declared_duration_minutes: Some(minutes),
            ..self.clone()
        }
    }
}

/// Builder for [`SessionInterval`].
#[derive(Debug, Clone, Default)]
pub struct SessionIntervalBuilder {
    inner: SessionInterval,
}

impl SessionIntervalBuilder {
    pub fn owner(mut self, owner_id: UserId) -> Self {
        self.inner.owner = Some(OwnerRef::new(owner_id));
        self
    }

    pub fn owner_ref(mut self, owner: OwnerRef) -> Self {
        self.inner.owner = Some(owner);
        self
    }

    pub fn id(mut self, id: StudySessionId) -> Self {
        self.inner.id = Some(id);
        self
    }

    pub fn start(mut self, start: Timestamp) -> Self {
        self.inner.start = Some(start);
        self
    }

    pub fn end(mut self, end: Timestamp) -> Self {
        self.inner.end = Some(end);
        self
    }

    pub fn declared_duration_minutes(mut self, minutes: i64) -> Self {
        self.inner.declared_duration_minutes = Some(minutes);
        self
    }

    pub fn build(self) -> SessionInterval {
        self.inner
    }
}

/// An interval that passed every check.
///
/// Only the validator creates these; handlers persist from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInterval {
    pub owner_id: UserId,
    pub id: Option<StudySessionId>,
    pub start: Timestamp,
    pub end: Timestamp,
    pub duration_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn new_builds_complete_interval_without_id() {
        let interval = SessionInterval::new(
            user(),
            ts("2025-11-29T10:00:00Z"),
            ts("2025-11-29T11:00:00Z"),
        );

        assert_eq!(interval.owner_id(), Some(&user()));
        assert!(interval.id().is_none());
        assert!(interval.declared_duration_minutes().is_none());
    }

    #[test]
    fn builder_leaves_missing_fields_empty() {
        let interval = SessionInterval::builder()
            .start(ts("2025-11-29T10:00:00Z"))
            .build();

        assert!(interval.owner().is_none());
        assert!(interval.end().is_none());
    }

    #[test]
    fn owner_ref_without_id_is_distinct_from_missing_owner() {
        let interval = SessionInterval::builder()
            .owner_ref(OwnerRef::without_id())
            .build();

        assert!(interval.owner().is_some());
        assert!(interval.owner_id().is_none());
    }

    #[test]
    fn with_methods_return_modified_copies() {
        let original = SessionInterval::new(
            user(),
            ts("2025-11-29T10:00:00Z"),
            ts("2025-11-29T11:00:00Z"),
        );
        let other = UserId::new("user-2").unwrap();
        let id = StudySessionId::new();

        let changed = original
            .with_owner(other.clone())
            .with_id(id)
            .with_declared_duration(60);

        assert_eq!(original.owner_id(), Some(&user()));
        assert_eq!(changed.owner_id(), Some(&other));
        assert_eq!(changed.id(), Some(&id));
        assert_eq!(changed.declared_duration_minutes(), Some(60));
        assert_eq!(changed.start(), original.start());
    }
}
