//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Clock` - Current instant, injectable for deterministic tests
//! - `StudySessionRepository` - Session store with owner-scoped range queries
//! - `UserDirectory` - Confirms a referenced user exists

mod clock;
mod study_session_repository;
mod user_directory;

pub use clock::Clock;
pub use study_session_repository::StudySessionRepository;
pub use user_directory::UserDirectory;
