//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod study_session;

pub use study_session::{
    // Commands and Results
    AdjustSessionTimesCommand, AdjustSessionTimesHandler, AdjustSessionTimesResult,
    DeleteStudySessionCommand, DeleteStudySessionHandler, EditStudySessionCommand,
    EditStudySessionHandler, EditStudySessionResult, LogStudySessionCommand,
    LogStudySessionHandler, LogStudySessionResult,
    // Queries
    GetStudySessionHandler, GetStudySessionQuery, ListStudySessionsHandler,
    ListStudySessionsQuery,
};
