//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `memory` - In-memory session store and user directory
//! - `postgres` - PostgreSQL session store and user directory

pub mod clock;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryStudySessionRepository, InMemoryUserDirectory};
pub use postgres::{PostgresStudySessionRepository, PostgresUserDirectory};
