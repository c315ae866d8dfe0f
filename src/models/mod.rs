//! Data models for the launch API
//!
//! Launch records decoded from the provider and the DTOs serialized into
//! HTTP response bodies.

pub mod launch;
pub mod responses;

// Re-export commonly used types
pub use launch::{Launch, LaunchPage};
pub use responses::{ErrorResponse, HealthResponse, LaunchQueryResult, StatsResponse};
