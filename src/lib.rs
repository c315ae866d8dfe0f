//! Launch Cache - launch-record query front-end
//!
//! Answers filtered launch queries from an upstream provider, caching both
//! the provider's raw answers and the rendered responses with a TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod source;

pub use api::AppState;
pub use config::Config;
