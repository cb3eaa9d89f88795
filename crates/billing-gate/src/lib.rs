//! Event-driven validation and routing pipeline for uploaded billing CSV
//! files.
//!
//! The [`workflows::billing`] module holds the pipeline itself; [`config`],
//! [`telemetry`], and [`error`] carry the surrounding application plumbing
//! shared with the service binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
