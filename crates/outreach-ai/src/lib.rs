//! Campaign eligibility rules engine and lead-assignment workflows for
//! B2B outreach automation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
