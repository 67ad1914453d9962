//! In-memory adapters for tests and local development.

mod study_session_repository;
mod user_directory;

pub use study_session_repository::InMemoryStudySessionRepository;
pub use user_directory::InMemoryUserDirectory;
