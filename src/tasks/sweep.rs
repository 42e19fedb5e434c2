//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

// == Sweep Handle ==
/// Owner side of a running sweep task.
///
/// Dropping the handle drops the shutdown sender, which also ends the task.
#[derive(Debug)]
pub struct SweepHandle {
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SweepHandle {
    // == Stop ==
    /// Signals the task and waits for it to finish.
    ///
    /// Safe to call more than once.
    pub async fn stop(&self) -> Result<()> {
        self.shutdown.send_replace(true);

        let task = self.task.lock().await.take();
        if let Some(task) = task {
            task.await
                .map_err(|err| CacheError::Internal(format!("sweep task failed: {err}")))?;
        }
        Ok(())
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.shutdown.is_closed()
    }
}

/// Spawns a background task that removes expired entries every `interval`.
///
/// Each cycle takes the store lock, scans the whole recency list and drops
/// what has expired. The first sweep happens one full interval after start.
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(1000, TimeDelta::minutes(5))?));
/// let sweeper = spawn_sweep_task(store.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.stop().await?;
/// ```
pub fn spawn_sweep_task<V>(store: Arc<Mutex<CacheStore<V>>>, interval: Duration) -> SweepHandle
where
    V: Clone + Send + 'static,
{
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                // Fires on the stop signal and when the sender is dropped
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {
                    let removed = {
                        let mut store = store.lock().await;
                        store.remove_expired(Utc::now())
                    };

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
            }
        }

        info!("TTL sweep task stopped");
    });

    SweepHandle {
        shutdown,
        task: Mutex::new(Some(task)),
    }
}
