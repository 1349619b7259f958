//! Background work for engines.
//!
//! Engines that simulate or drive playback from background work spawn it
//! through [`TaskSpawner`] instead of calling `tokio::spawn` directly, so a
//! host can run the core on whatever runtime it already owns. Every spawn
//! returns a [`TaskHandle`] the engine keeps until `teardown`.

use std::fmt;
use std::future::Future;

/// Cancels one spawned task.
///
/// Dropping the handle leaves the task running; only [`abort`](Self::abort)
/// stops it.
pub struct TaskHandle {
    abort: Option<Box<dyn FnOnce() + Send>>,
}

impl TaskHandle {
    /// Wraps the closure that cancels the task.
    pub fn new(abort: impl FnOnce() + Send + 'static) -> Self {
        Self {
            abort: Some(Box::new(abort)),
        }
    }

    /// A handle for a task that cannot be cancelled.
    #[must_use]
    pub fn detached() -> Self {
        Self { abort: None }
    }

    /// Cancels the task. A task that already finished is unaffected.
    pub fn abort(mut self) {
        if let Some(abort) = self.abort.take() {
            abort();
        }
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("abortable", &self.abort.is_some())
            .finish()
    }
}

/// Spawns engine background work.
///
/// A spawner that cannot cancel returns [`TaskHandle::detached`]; such tasks
/// still stop on their own once
/// [`EngineSession::is_current`](crate::engine::EngineSession::is_current)
/// turns false.
pub trait TaskSpawner: Send + Sync {
    fn spawn<F>(&self, future: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Spawner backed by a Tokio runtime handle.
#[derive(Clone)]
pub struct TokioSpawner {
    handle: tokio::runtime::Handle,
}

impl TokioSpawner {
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context.
    #[must_use]
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

impl TaskSpawner for TokioSpawner {
    fn spawn<F>(&self, future: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let task = self.handle.spawn(future).abort_handle();
        TaskHandle::new(move || task.abort())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn delayed_tick(counter: &Arc<AtomicUsize>, delay: Duration) -> impl Future<Output = ()> {
        let counter = Arc::clone(counter);
        async move {
            tokio::time::sleep(delay).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_leaves_task_running() {
        let spawner = TokioSpawner::current();
        let ticks = Arc::new(AtomicUsize::new(0));

        drop(spawner.spawn(delayed_tick(&ticks, Duration::from_millis(100))));
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_task_never_completes() {
        let spawner = TokioSpawner::current();
        let ticks = Arc::new(AtomicUsize::new(0));

        let handle = spawner.spawn(delayed_tick(&ticks, Duration::from_millis(100)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn detached_abort_is_a_no_op() {
        let handle = TaskHandle::detached();
        assert_eq!(format!("{:?}", handle), "TaskHandle { abortable: false }");
        handle.abort();
    }
}
