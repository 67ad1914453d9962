//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the study session domain.

mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{StudySessionId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
