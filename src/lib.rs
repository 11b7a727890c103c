//! Cafe Cache - time-bounded cache for the cafe admin dashboard
//!
//! Memoizes backend documents between list and detail screens, with lazy
//! expiry on read and a periodic background sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheHandle, CacheKey, CacheStore};
pub use config::Config;
pub use tasks::spawn_sweep_task;
