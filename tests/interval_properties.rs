//! Property tests for the interval rules.
//!
//! `now` is fixed; generated intervals are placed relative to it.

use std::sync::Arc;

use proptest::prelude::*;

use study_sessions::adapters::{FixedClock, InMemoryStudySessionRepository, InMemoryUserDirectory};
use study_sessions::application::StudySessionValidator;
use study_sessions::domain::foundation::{Timestamp, UserId};
use study_sessions::domain::study_session::{
    check_structure, ranges_overlap, OwnerRef, SessionInterval, ValidationErrorKind,
    ValidationMode, ValidationPolicy,
};

const DAY_MINUTES: i64 = 24 * 60;

fn now() -> Timestamp {
    Timestamp::parse_rfc3339("2025-11-29T12:00:00Z").unwrap()
}

fn minutes_ago(minutes: i64) -> Timestamp {
    now().plus_minutes(-minutes)
}

fn owner() -> UserId {
    UserId::new("prop-user").unwrap()
}

fn mode() -> impl Strategy<Value = ValidationMode> {
    prop_oneof![Just(ValidationMode::Create), Just(ValidationMode::Update)]
}

fn owner_ref() -> impl Strategy<Value = Option<OwnerRef>> {
    prop_oneof![
        Just(None),
        Just(Some(OwnerRef::without_id())),
        Just(Some(OwnerRef::new(owner()))),
    ]
}

proptest! {
    #[test]
    fn well_formed_recent_intervals_pass_structure(
        length in 1i64..=DAY_MINUTES,
        gap in 0i64..(20 * DAY_MINUTES),
        mode in mode(),
    ) {
        let start = minutes_ago(length + gap);
        let end = start.plus_minutes(length);
        let interval = SessionInterval::new(owner(), start, end);

        prop_assert!(check_structure(&interval, &now(), mode, &ValidationPolicy::default()).is_ok());
    }

    #[test]
    fn end_not_after_start_is_always_end_before_start(
        start_ago in 0i64..(29 * DAY_MINUTES),
        backwards in 0i64..(2 * DAY_MINUTES),
        declared in proptest::option::of(-10i64..2000),
        owner in owner_ref(),
        mode in mode(),
    ) {
        let start = minutes_ago(start_ago);
        let mut builder = SessionInterval::builder()
            .start(start)
            .end(start.plus_minutes(-backwards));
        if let Some(owner) = owner {
            builder = builder.owner_ref(owner);
        }
        if let Some(minutes) = declared {
            builder = builder.declared_duration_minutes(minutes);
        }

        let err = check_structure(&builder.build(), &now(), mode, &ValidationPolicy::default())
            .unwrap_err();

        prop_assert_eq!(err.kind, ValidationErrorKind::EndBeforeStart);
    }

    #[test]
    fn structural_check_is_repeatable(
        start_ago in -10i64..(40 * DAY_MINUTES),
        length in -120i64..(2 * DAY_MINUTES),
        declared in proptest::option::of(0i64..3000),
        mode in mode(),
    ) {
        let start = minutes_ago(start_ago);
        let mut interval = SessionInterval::new(owner(), start, start.plus_minutes(length));
        if let Some(minutes) = declared {
            interval = interval.with_declared_duration(minutes);
        }
        let policy = ValidationPolicy::default();

        let first = check_structure(&interval, &now(), mode, &policy);
        let second = check_structure(&interval, &now(), mode, &policy);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn declared_duration_within_one_minute_is_accepted(
        length in 2i64..DAY_MINUTES,
        delta in -1i64..=1,
    ) {
        let start = minutes_ago(length + 5);
        let interval = SessionInterval::new(owner(), start, start.plus_minutes(length))
            .with_declared_duration(length + delta);

        prop_assert!(
            check_structure(&interval, &now(), ValidationMode::Create, &ValidationPolicy::default())
                .is_ok()
        );
    }

    #[test]
    fn declared_duration_further_off_is_mismatch(
        length in 2i64..DAY_MINUTES,
        delta in 2i64..600,
        shorter in any::<bool>(),
    ) {
        let declared = if shorter { length - delta } else { length + delta };
        prop_assume!(declared >= 1);
        let start = minutes_ago(length + 5);
        let interval = SessionInterval::new(owner(), start, start.plus_minutes(length))
            .with_declared_duration(declared);

        let err = check_structure(&interval, &now(), ValidationMode::Create, &ValidationPolicy::default())
            .unwrap_err();

        prop_assert_eq!(err.kind, ValidationErrorKind::DurationMismatch);
    }

    #[test]
    fn overlap_is_symmetric(
        a_start in 0i64..1000,
        a_len in 1i64..300,
        b_start in 0i64..1000,
        b_len in 1i64..300,
    ) {
        let (a_s, a_e) = (minutes_ago(a_start), minutes_ago(a_start - a_len));
        let (b_s, b_e) = (minutes_ago(b_start), minutes_ago(b_start - b_len));

        prop_assert_eq!(
            ranges_overlap(&a_s, &a_e, &b_s, &b_e),
            ranges_overlap(&b_s, &b_e, &a_s, &a_e)
        );
    }

    #[test]
    fn overlap_means_shared_instant(
        a_start in 0i64..1000,
        a_len in 1i64..300,
        b_start in 0i64..1000,
        b_len in 1i64..300,
    ) {
        let (a_s, a_e) = (minutes_ago(a_start), minutes_ago(a_start - a_len));
        let (b_s, b_e) = (minutes_ago(b_start), minutes_ago(b_start - b_len));
        let latest_start = a_s.max(b_s);
        let earliest_end = a_e.min(b_e);

        prop_assert_eq!(ranges_overlap(&a_s, &a_e, &b_s, &b_e), latest_start < earliest_end);
    }

    #[test]
    fn back_to_back_ranges_never_overlap(
        start in 0i64..1000,
        first_len in 1i64..300,
        second_len in 1i64..300,
    ) {
        let first_start = minutes_ago(start);
        let boundary = first_start.plus_minutes(first_len);
        let second_end = boundary.plus_minutes(second_len);

        prop_assert!(!ranges_overlap(&first_start, &boundary, &boundary, &second_end));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn create_succeeds_for_valid_interval_without_neighbours(
        length in 1i64..=DAY_MINUTES,
        gap in 0i64..(20 * DAY_MINUTES),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let validator = StudySessionValidator::new(
            Arc::new(FixedClock::new(now())),
            Arc::new(InMemoryStudySessionRepository::new()),
            Arc::new(InMemoryUserDirectory::with_users([owner()])),
            ValidationPolicy::default(),
        );
        let start = minutes_ago(length + gap);
        let interval = SessionInterval::new(owner(), start, start.plus_minutes(length));

        let validated = runtime.block_on(validator.validate_for_create(&interval)).unwrap();

        prop_assert_eq!(validated.duration_minutes, length);
    }
}
