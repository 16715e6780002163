//! Trailing-edge debouncing.
//!
//! A [`Debouncer`] runs its callback once, `delay` after the most recent
//! [`call`](Debouncer::call), with that call's argument. Every new call
//! cancels the pending timer and starts a fresh one.
//!
//! Timers are Tokio tasks; `call` must run inside a runtime.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

pub struct Debouncer<A> {
    callback: Callback<A>,
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
}

#[derive(Default)]
struct Pending {
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self { callback: Arc::clone(&self.callback), delay: self.delay, pending: Arc::clone(&self.pending) }
    }
}

impl<A> std::fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl<A: Send + 'static> Debouncer<A> {
    #[must_use]
    pub fn new(callback: impl Fn(A) + Send + Sync + 'static, delay: Duration) -> Self {
        Self { callback: Arc::new(callback), delay, pending: Arc::new(Mutex::new(Pending::default())) }
    }

    /// Restart the quiet period with `arg` as the pending argument.
    pub fn call(&self, arg: A) {
        let mut pending = self.lock();
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation += 1;
        let generation = pending.generation;

        let callback = Arc::clone(&self.callback);
        let slot = Arc::clone(&self.pending);
        let deadline = Instant::now() + self.delay;
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            {
                let mut pending = slot.lock().unwrap_or_else(PoisonError::into_inner);
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
            }
            callback(arg);
        }));
    }
}

impl<A> Debouncer<A> {
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a call is waiting for its quiet period to end.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().timer.is_some()
    }

    /// Drop the pending call, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = self.lock();
        pending.generation += 1;
        match pending.timer.take() {
            Some(timer) => {
                timer.abort();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Wrap `callback` in a debouncer and return the call entry point.
#[must_use]
pub fn debounce<A: Send + 'static>(callback: impl Fn(A) + Send + Sync + 'static, delay: Duration) -> impl Fn(A) {
    let debouncer = Debouncer::new(callback, delay);
    move |arg| debouncer.call(arg)
}
