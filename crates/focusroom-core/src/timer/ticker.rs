//! Periodic driver for a shared [`CountdownTimer`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{CountdownTimer, TimerEvent};
use crate::clock::Clock;

/// Default tick cadence.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task ticking a timer until stopped.
///
/// The completion callback runs at most once. After [`Ticker::stop`] returns,
/// or the ticker is dropped, it never runs.
///
/// The callback runs under the same guard that `stop` and `Drop` take, so it
/// must not stop or drop its own ticker; that deadlocks. Signal the owner
/// instead (a channel, say) and stop from there.
pub struct Ticker {
    handle: JoinHandle<()>,
    /// Set once stopped. Held across each tick and callback.
    cancelled: Arc<Mutex<bool>>,
}

impl Ticker {
    /// Spawn on the current tokio runtime.
    pub fn spawn<F>(
        timer: Arc<Mutex<CountdownTimer>>,
        clock: Arc<dyn Clock>,
        period: Duration,
        on_complete: F,
    ) -> Self
    where
        F: FnOnce(TimerEvent) + Send + 'static,
    {
        let cancelled = Arc::new(Mutex::new(false));
        let gate = cancelled.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut on_complete = Some(on_complete);
            loop {
                interval.tick().await;
                let stopped = gate.lock().unwrap_or_else(|p| p.into_inner());
                if *stopped {
                    break;
                }
                let event = timer
                    .lock()
                    .unwrap_or_else(|p| p.into_inner())
                    .tick(clock.now_utc());
                if let Some(event @ TimerEvent::Completed { .. }) = event {
                    if let Some(callback) = on_complete.take() {
                        tracing::debug!("countdown reached zero");
                        callback(event);
                    }
                }
            }
        });
        Self { handle, cancelled }
    }

    /// Stop ticking. No completion callback fires after this returns.
    pub fn stop(self) {
        // Drop does the work.
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        *self.cancelled.lock().unwrap_or_else(|p| p.into_inner()) = true;
        self.handle.abort();
    }
}
