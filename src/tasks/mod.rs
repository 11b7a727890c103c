//! Background Tasks Module
//!
//! # Tasks
//! - Sweep: removes expired cache entries on a fixed interval

mod sweep;

pub use sweep::{spawn_sweep_task, DEFAULT_SWEEP_INTERVAL};
