//! Debouncing of recalculation triggered by keystrokes.
//!
//! A [`Debouncer`] owns at most one pending invocation. Every call replaces
//! it: the previous timer is aborted and a new one is armed with the latest
//! arguments, so only the last call within a `delay` window runs.
//!
//! Timers run on the caller's tokio runtime. Calls made outside one are
//! driven by a small shared background runtime, so debouncing holds there too.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use saledesk_shared::InputConfig;
use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Runtime for timers armed from threads without a tokio runtime.
static FALLBACK_RUNTIME: Lazy<Option<Runtime>> = Lazy::new(|| {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("saledesk-debounce")
        .enable_time()
        .build()
        .inspect_err(|err| warn!(error = %err, "failed to start debounce runtime"))
        .ok()
});

fn timer_handle() -> Option<Handle> {
    Handle::try_current()
        .ok()
        .or_else(|| FALLBACK_RUNTIME.as_ref().map(|runtime| runtime.handle().clone()))
}

/// Runs a callback `delay` after the most recent call, dropping earlier ones.
///
/// Calls are fire-and-forget. Timers run on the tokio runtime the call is
/// made from, or on a shared background runtime when there is none. Pending
/// work is cancelled when the debouncer is dropped.
pub struct Debouncer<T> {
    callback: Callback<T>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer around `callback`.
    pub fn new(delay: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Creates a debouncer using the configured input delay.
    pub fn from_config(config: &InputConfig, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(Duration::from_millis(config.debounce_ms), callback)
    }

    /// Delay between the last call and the callback.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `callback(args)` after the delay, superseding any pending
    /// invocation.
    ///
    /// If no timer runtime can be started the call is dropped with a warning.
    pub fn call(&self, args: T) {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
            trace!("debounced call superseded");
        }

        let Some(handle) = timer_handle() else {
            warn!("no timer runtime, debounced call dropped");
            return;
        };

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        *pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
        trace!(?delay, "debounced call scheduled");
    }

    /// Cancels the pending invocation. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(previous) => {
                let was_waiting = !previous.is_finished();
                previous.abort();
                was_waiting
            }
            None => false,
        }
    }

    /// Returns true while an invocation is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Debouncer<T> {
    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        // The guarded handle stays valid even if a holder panicked.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(previous) = self.lock_pending().take() {
            previous.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep};

    type Fired = Arc<Mutex<Vec<(u32, Duration)>>>;

    fn recording(start: Instant, delay_ms: u64) -> (Debouncer<u32>, Fired) {
        let fired: Fired = Arc::default();
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move |value| {
            sink.lock().unwrap().push((value, start.elapsed()));
        });
        (debouncer, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_in_window_fires() {
        let start = Instant::now();
        let (debouncer, fired) = recording(start, 50);

        debouncer.call(1); // t=0
        sleep(Duration::from_millis(10)).await;
        debouncer.call(2); // t=10
        sleep(Duration::from_millis(10)).await;
        debouncer.call(3); // t=20

        sleep(Duration::from_millis(49)).await; // t=69
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(31)).await; // t=100
        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 3);
        assert!(fired[0].1 >= Duration::from_millis(70));
        assert!(fired[0].1 < Duration::from_millis(71));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_spaced_beyond_delay_all_fire() {
        let (debouncer, fired) = recording(Instant::now(), 50);

        debouncer.call(1);
        sleep(Duration::from_millis(60)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(60)).await;

        let values: Vec<u32> = fired.lock().unwrap().iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_instances_are_independent() {
        let start = Instant::now();
        let (first, first_fired) = recording(start, 50);
        let (second, second_fired) = recording(start, 50);

        first.call(1);
        second.call(10);
        sleep(Duration::from_millis(20)).await;
        first.call(2);
        sleep(Duration::from_millis(100)).await;

        let first_fired = first_fired.lock().unwrap();
        let second_fired = second_fired.lock().unwrap();
        assert_eq!(first_fired.len(), 1);
        assert_eq!(first_fired[0].0, 2);
        assert!(first_fired[0].1 >= Duration::from_millis(70));
        assert_eq!(second_fired.len(), 1);
        assert_eq!(second_fired[0].0, 10);
        assert!(second_fired[0].1 < Duration::from_millis(70));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (debouncer, fired) = recording(Instant::now(), 50);

        assert!(!debouncer.cancel());
        debouncer.call(1);
        assert!(debouncer.cancel());
        assert!(!debouncer.is_pending());

        sleep(Duration::from_millis(100)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (debouncer, fired) = recording(Instant::now(), 50);

        debouncer.call(1);
        drop(debouncer);

        sleep(Duration::from_millis(100)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config() {
        let config = InputConfig { debounce_ms: 120 };
        let debouncer = Debouncer::from_config(&config, |_: ()| {});
        assert_eq!(debouncer.delay(), Duration::from_millis(120));
    }

    #[test]
    fn test_rapid_calls_without_runtime_fire_once() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(50), move |value: u32| {
            sink.lock().unwrap().push(value);
        });

        debouncer.call(1);
        debouncer.call(2);
        debouncer.call(3);
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        std::thread::sleep(Duration::from_millis(300));
        assert_eq!(*fired.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_drop_without_runtime_cancels_pending_call() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let debouncer = Debouncer::new(Duration::from_millis(50), move |value: u32| {
            sink.lock().unwrap().push(value);
        });

        debouncer.call(1);
        drop(debouncer);

        std::thread::sleep(Duration::from_millis(200));
        assert!(fired.lock().unwrap().is_empty());
    }
}
