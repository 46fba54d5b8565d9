//! Trailing-edge debounce on the tokio runtime.
//!
//! Each [`Debounce::call`] cancels the pending invocation and schedules a
//! new one after the quiet window, so only the last arguments of a burst
//! reach the wrapped function.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// A debounced wrapper around a callback.
pub struct Debounce<T> {
    /// Quiet window before the callback fires.
    delay: Duration,
    /// The wrapped function.
    callback: Arc<dyn Fn(T) + Send + Sync>,
    /// Timer task for the pending invocation, if any.
    pending: Option<JoinHandle<()>>,
}

/// Wrap `callback` so bursts of calls collapse into one after `delay`.
pub fn debounce<T, F>(callback: F, delay: Duration) -> Debounce<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debounce {
        delay,
        callback: Arc::new(callback),
        pending: None,
    }
}

impl<T: Send + 'static> Debounce<T> {
    /// Schedule the callback with `args`, replacing any pending call.
    ///
    /// Outside a tokio runtime there is no timer to wait on, so the
    /// callback runs immediately.
    pub fn call(&mut self, args: T) {
        self.cancel();

        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime available, invoking debounced call immediately");
            (self.callback)(args);
            return;
        };

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        trace!(delay_ms = delay.as_millis() as u64, "Scheduling debounced call");
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Whether a call is waiting for its quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// The configured quiet window.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}
