//! Clock port.
//!
//! Validation compares submitted timestamps against "now". Injecting the
//! clock keeps that comparison deterministic in tests.

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
