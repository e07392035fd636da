use parking_lot::Mutex;
use std::future::{Future, poll_fn};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// Background sequences started by page events.
#[derive(Debug, Clone, Default)]
pub struct Tasks {
    set: Arc<Mutex<JoinSet<()>>>,
}

impl Tasks {
    /// Must be called from inside a tokio runtime.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.set.lock().spawn(task);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.lock().is_empty()
    }

    /// Waits until every task, including the ones spawned meanwhile, has finished.
    ///
    /// Tasks stay in the shared set while waiting, so dropping the returned
    /// future leaves them running.
    pub async fn settle(&self) {
        while let Some(result) = poll_fn(|cx| self.set.lock().poll_join_next(cx)).await {
            if let Err(err) = result {
                warn!("Page task failed: {err}");
            }
        }
    }

    pub fn abort_all(&self) {
        self.set.lock().abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_tasks_spawned_meanwhile() {
        let tasks = Tasks::default();
        let finished = Arc::new(AtomicBool::new(false));

        let inner = tasks.clone();
        let flag = Arc::clone(&finished);
        tasks.spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            inner.spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                flag.store(true, Ordering::SeqCst);
            });
        });

        tasks.settle().await;
        assert!(finished.load(Ordering::SeqCst));
        assert!(tasks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_settle_keeps_tasks_running() {
        let tasks = Tasks::default();
        let finished = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&finished);
        tasks.spawn(async move {
            tokio::time::sleep(Duration::from_millis(3_300)).await;
            flag.store(true, Ordering::SeqCst);
        });

        let cancelled = tokio::time::timeout(Duration::from_millis(100), tasks.settle()).await;
        assert!(cancelled.is_err());
        assert_eq!(tasks.len(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(finished.load(Ordering::SeqCst));

        tasks.settle().await;
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_stop_settle() {
        let tasks = Tasks::default();
        tasks.spawn(async { panic!("boom") });
        tasks.spawn(async {});

        tasks.settle().await;
        assert!(tasks.is_empty());
    }
}
