//! API Module
//!
//! HTTP handlers and routing for the local cache service.
//!
//! # Endpoints
//! - `GET /cache` - List live keys
//! - `DELETE /cache` - Clear every entry
//! - `PUT /cache/:key` - Store a document
//! - `GET /cache/:key` - Retrieve a document
//! - `PATCH /cache/:key` - Merge-patch a cached document in place
//! - `DELETE /cache/:key` - Invalidate a key
//! - `GET /cache/:key/exists` - Liveness check
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod patch;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
