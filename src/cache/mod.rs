//! Cache Module
//!
//! Time-bounded key/value cache shared by every dashboard screen.

mod entry;
mod handle;
mod key;
mod refresh;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::{CacheHandle, Document};
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum accepted key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
