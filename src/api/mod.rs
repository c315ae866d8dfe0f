//! API Module
//!
//! HTTP handlers and routing for the launch service.
//!
//! # Endpoints
//! - `GET /launches` - Filtered, sorted and limited launch records
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
