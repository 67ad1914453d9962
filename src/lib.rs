//! Study Sessions - Interval validation for user-reported study sessions
//!
//! Checks that a logged or edited session is well-formed, not implausibly
//! dated, within duration limits, owned by a known user and free of
//! overlap with that user's other sessions, then commits it under a
//! per-owner lock.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
