//! Study session command and query handlers.
//!
//! Writes go through `StudySessionValidator::commit_*`, which holds the
//! owner's lock across validation and persistence.

mod adjust_session_times;
mod delete_session;
mod edit_session;
mod get_session;
mod list_sessions;
mod log_session;

#[cfg(test)]
mod fixtures;

pub use adjust_session_times::{
    AdjustSessionTimesCommand, AdjustSessionTimesHandler, AdjustSessionTimesResult,
};
pub use delete_session::{DeleteStudySessionCommand, DeleteStudySessionHandler};
pub use edit_session::{EditStudySessionCommand, EditStudySessionHandler, EditStudySessionResult};
pub use get_session::{GetStudySessionHandler, GetStudySessionQuery};
pub use list_sessions::{ListStudySessionsHandler, ListStudySessionsQuery};
pub use log_session::{LogStudySessionCommand, LogStudySessionHandler, LogStudySessionResult};

use crate::domain::study_session::{calculate_duration_minutes, SessionInterval};

/// Fills a missing or zero declared duration with the computed minutes.
///
/// Left untouched when the bounds cannot produce a duration; the
/// structural checks report that case.
fn with_filled_duration(interval: SessionInterval) -> SessionInterval {
    match interval.declared_duration_minutes() {
        Some(minutes) if minutes != 0 => interval,
        _ => match calculate_duration_minutes(interval.start(), interval.end()) {
            Ok(minutes) => interval.with_declared_duration(minutes),
            Err(_) => interval,
        },
    }
}
