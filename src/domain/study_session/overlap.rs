//! Half-open interval overlap rules.
//!
//! Two ranges `[s, e)` and `[s', e')` conflict iff `s' < e && e' > s`.
//! Touching ranges (one ends exactly when the other begins) do not
//! conflict, so back-to-back sessions are allowed.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StudySessionId, Timestamp};

/// Stored range of an existing session, as returned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpan {
    pub id: StudySessionId,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl SessionSpan {
    pub fn new(id: StudySessionId, start: Timestamp, end: Timestamp) -> Self {
        Self { id, start, end }
    }

    /// True if this span shares at least one instant with `[start, end)`.
    pub fn overlaps(&self, start: &Timestamp, end: &Timestamp) -> bool {
        ranges_overlap(&self.start, &self.end, start, end)
    }
}

/// Strict-inequality overlap test for two half-open ranges.
pub fn ranges_overlap(
    a_start: &Timestamp,
    a_end: &Timestamp,
    b_start: &Timestamp,
    b_end: &Timestamp,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Existing spans that collide with `[start, end)`, skipping `exclude`.
///
/// The predicate is re-applied to the candidates so that a store with
/// a looser (e.g. inclusive) filter cannot produce false conflicts.
pub fn find_conflicts<'a, I>(
    candidates: I,
    start: &Timestamp,
    end: &Timestamp,
    exclude: Option<&StudySessionId>,
) -> Vec<SessionSpan>
where
    I: IntoIterator<Item = &'a SessionSpan>,
{
    candidates
        .into_iter()
        .filter(|span| Some(&span.id) != exclude)
        .filter(|span| span.overlaps(start, end))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hhmm: &str) -> Timestamp {
        Timestamp::parse_rfc3339(&format!("2025-11-29T{}:00Z", hhmm)).unwrap()
    }

    fn span(start: &str, end: &str) -> SessionSpan {
        SessionSpan::new(StudySessionId::new(), at(start), at(end))
    }

    #[test]
    fn disjoint_before_does_not_conflict() {
        let existing = span("08:00", "09:00");
        assert!(!existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn disjoint_after_does_not_conflict() {
        let existing = span("12:00", "13:00");
        assert!(!existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn new_starting_inside_existing_conflicts() {
        let existing = span("10:00", "11:00");
        assert!(existing.overlaps(&at("10:30"), &at("11:30")));
    }

    #[test]
    fn existing_starting_inside_new_conflicts() {
        let existing = span("10:30", "11:30");
        assert!(existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn new_covering_existing_conflicts() {
        let existing = span("10:15", "10:45");
        assert!(existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn existing_covering_new_conflicts() {
        let existing = span("09:00", "12:00");
        assert!(existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn identical_ranges_conflict() {
        let existing = span("10:00", "11:00");
        assert!(existing.overlaps(&at("10:00"), &at("11:00")));
    }

    #[test]
    fn touching_boundaries_do_not_conflict() {
        let existing = span("10:00", "11:00");
        assert!(!existing.overlaps(&at("11:00"), &at("12:00")));
        assert!(!existing.overlaps(&at("09:00"), &at("10:00")));
    }

    #[test]
    fn find_conflicts_excludes_own_prior_version() {
        let own = span("10:00", "11:00");
        let other = span("11:15", "11:45");
        let candidates = vec![own, other];

        let conflicts = find_conflicts(&candidates, &at("10:00"), &at("11:30"), Some(&own.id));

        assert_eq!(conflicts, vec![other]);
    }

    #[test]
    fn find_conflicts_drops_touching_candidates_from_loose_store() {
        let touching = span("11:00", "12:00");
        let candidates = vec![touching];

        let conflicts = find_conflicts(&candidates, &at("10:00"), &at("11:00"), None);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn find_conflicts_without_exclusion_keeps_all_hits() {
        let a = span("10:00", "10:30");
        let b = span("10:20", "10:40");
        let candidates = vec![a, b];

        let conflicts = find_conflicts(&candidates, &at("10:10"), &at("10:25"), None);

        assert_eq!(conflicts.len(), 2);
    }
}
