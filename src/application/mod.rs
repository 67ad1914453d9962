//! Application layer - Validation service, owner locks and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;
mod owner_locks;
mod validation_service;

pub use handlers::{
    AdjustSessionTimesCommand, AdjustSessionTimesHandler, AdjustSessionTimesResult,
    DeleteStudySessionCommand, DeleteStudySessionHandler, EditStudySessionCommand,
    EditStudySessionHandler, EditStudySessionResult, GetStudySessionHandler,
    GetStudySessionQuery, ListStudySessionsHandler, ListStudySessionsQuery,
    LogStudySessionCommand, LogStudySessionHandler, LogStudySessionResult,
};
pub use owner_locks::{OwnerGuard, OwnerLocks};
pub use validation_service::StudySessionValidator;
