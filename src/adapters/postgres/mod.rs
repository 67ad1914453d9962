//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresStudySessionRepository` - Session store guarded by an exclusion constraint
//! - `PostgresUserDirectory` - User existence lookups
//! - `connect` - Pool construction and migrations

mod pool;
mod study_session_repository;
mod user_directory;

pub use pool::connect;
pub use study_session_repository::PostgresStudySessionRepository;
pub use user_directory::PostgresUserDirectory;
