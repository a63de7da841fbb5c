//! Debounced values and callbacks.
//!
//! Each instance owns at most one pending timer. A new input aborts the
//! pending timer and starts a fresh one, so a burst of inputs produces a single
//! downstream update once the input has been stable for the delay. Dropping
//! the instance aborts whatever is still pending.
//!
//! Both types spawn their timers on the ambient Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default settling window for search input.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Slot holding the single pending timer of a debouncer.
#[derive(Debug, Default)]
struct PendingTimer(Mutex<Option<JoinHandle<()>>>);

impl PendingTimer {
    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Aborts the pending timer, if any, and installs `next`.
    fn replace(&self, next: JoinHandle<()>) {
        if let Some(previous) = self.slot().replace(next) {
            previous.abort();
        }
    }

    /// Aborts the pending timer. Returns whether one was still running.
    fn cancel(&self) -> bool {
        match self.slot().take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for PendingTimer {
    fn drop(&mut self) {
        let slot = self.0.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

/// A value that only settles after its input stops changing.
///
/// The settled value is published through a `watch` channel; it is `None`
/// until the first emission.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    immediate: bool,
    settled: Arc<watch::Sender<Option<T>>>,
    pending: PendingTimer,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(delay: Duration) -> Self {
        Self::build(delay, false)
    }

    /// Like [`Debouncer::new`], but the first input is emitted without delay.
    /// Later inputs are debounced as usual.
    pub fn immediate(delay: Duration) -> Self {
        Self::build(delay, true)
    }

    fn build(delay: Duration, immediate: bool) -> Self {
        let (settled, _) = watch::channel(None);
        Self {
            delay,
            immediate,
            settled: Arc::new(settled),
            pending: PendingTimer::default(),
        }
    }

    /// Feeds a new input value, restarting the settling window.
    pub fn push(&self, value: T) {
        if self.immediate && self.settled.borrow().is_none() {
            self.pending.cancel();
            self.settled.send_replace(Some(value));
            return;
        }

        let settled = Arc::clone(&self.settled);
        let delay = self.delay;
        self.pending.replace(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            settled.send_replace(Some(value));
        }));
    }

    /// Last settled value.
    pub fn current(&self) -> Option<T> {
        self.settled.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<T>> {
        self.settled.subscribe()
    }

    /// Discards the pending input without emitting it.
    pub fn cancel(&self) -> bool {
        self.pending.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Invokes a callback with the last arguments of a burst, once the burst settles.
pub struct DebouncedCallback<A> {
    delay: Duration,
    callback: Arc<dyn Fn(A) + Send + Sync>,
    pending: PendingTimer,
}

impl<A> DebouncedCallback<A>
where
    A: Send + 'static,
{
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: PendingTimer::default(),
        }
    }

    /// Schedules the callback with `args`, superseding any pending call.
    pub fn call(&self, args: A) {
        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        self.pending.replace(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    pub fn cancel(&self) -> bool {
        self.pending.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }
}

impl<A> std::fmt::Debug for DebouncedCallback<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedCallback")
            .field("delay", &self.delay)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
