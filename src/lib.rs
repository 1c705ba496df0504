//! Terminal Bridge Library
//!
//! Status-report ingestion and command dispatch for a polling trading terminal.

pub mod application;
pub mod config;
pub mod domain;
pub mod rate_limit;
