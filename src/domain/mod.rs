//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, ownership)
//! - `study_session` - Interval validation rules and the session record

pub mod foundation;
pub mod study_session;
