//! Expiry Sweep Task
//!
//! Removes expired entries on a fixed interval, whether or not anyone reads them.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheHandle;

/// Sweep interval used by the dashboard: once per minute.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns a task that sweeps expired entries out of `cache` every `interval`.
///
/// The task loops forever. Abort the returned handle on shutdown.
///
/// # Example
/// ```ignore
/// let cache = CacheHandle::default();
/// let sweep = spawn_sweep_task(cache.clone(), DEFAULT_SWEEP_INTERVAL);
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_sweep_task(cache: CacheHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
