use futures::future::{AbortHandle, Abortable};
use std::{future::Future, sync::atomic::AtomicBool, sync::atomic::Ordering, sync::Arc};
use tokio::task::JoinHandle;

/// Background activity which can be cancelled, e.g. the presence watcher.
#[derive(Debug)]
pub struct Task {
    name: &'static str,
    done: Arc<AtomicBool>,
    shutdown: AbortHandle,
    handle: JoinHandle<()>,
}

impl Task {
    /// Creates a new task and immediatly runs it in a `tokio::task`.
    pub fn spawn<F>(name: &'static str, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, abort_registration) = AbortHandle::new_pair();
        let done = Arc::new(AtomicBool::new(false));
        let done2 = done.clone();
        let future = Abortable::new(task, abort_registration);
        let handle = tokio::task::spawn(async move {
            if future.await.is_ok() {
                log::warn!("Background task '{}' stopped on its own.", name);
            }
            done2.store(true, Ordering::Relaxed);
        });

        log::info!("Started background task '{}'.", name);
        Self {
            name,
            done,
            shutdown,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks whether the task has completed
    pub fn has_finished(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Cancels the task and joins it.
    pub async fn cancel(self) {
        self.shutdown.abort();
        let _ = self.handle.await;
        log::info!("Stopped background task '{}'.", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_stops_pending_work() {
        let task = Task::spawn("pending", futures::future::pending());
        assert!(!task.has_finished());
        let done = task.done.clone();

        task.cancel().await;
        assert!(done.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn finished_work_is_reported() {
        let task = Task::spawn("short", async {});
        tokio::time::timeout(Duration::from_secs(1), async {
            while !task.has_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(task.name(), "short");
    }
}
