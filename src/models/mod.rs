//! Request and Response models for the cache service API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_key, SetRequest, SyncRequest};
pub use responses::{
    ClearResponse, ErrorResponse, ExistsResponse, GetResponse, HealthResponse, InvalidateResponse,
    KeysResponse, SetResponse, StatsResponse, SyncResponse,
};
