//! Query Module
//!
//! Parameter canonicalization, the filtering engine, and the cached
//! lookup-or-compute service built on them.

pub mod engine;
pub mod params;
pub mod service;


pub use engine::{run_query, select};
pub use params::{LaunchQueryParameters, SortOrder, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use service::{CachedPayload, LaunchQueryService};
