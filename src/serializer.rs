//! Action Serializer
//!
//! Single-concurrency task queue for browser-action state updates. Every
//! recomputation of the visible action element is submitted here, so
//! recomputations triggered by rapid successive configuration changes run
//! strictly in order and never overlap. The queue offers no cancellation:
//! submitted work always eventually runs, including during shutdown, which
//! drains the queue before the worker exits.
//!
//! The serializer is an explicitly constructed value, not process-wide
//! state; embeddings and tests create as many independent instances as they
//! need.

use crate::error::SerializerClosed;
use parking_lot::{Mutex, RwLock};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

type Task = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Queue statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializerStats {
    pub submitted: usize,
    pub completed: usize,
}

pub struct ActionSerializer {
    tx: Mutex<Option<mpsc::UnboundedSender<Task>>>,
    worker: Mutex<Option<tokio::task::JoinHandle<()>>>,
    stats: Arc<RwLock<SerializerStats>>,
}

impl ActionSerializer {
    /// Create a serializer and spawn its worker.
    pub fn new() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Task>();
        let stats: Arc<RwLock<SerializerStats>> = Arc::new(RwLock::new(SerializerStats::default()));

        let worker_stats = Arc::clone(&stats);
        let worker = tokio::spawn(async move {
            debug!("Action serializer worker started");
            while let Some(task) = rx.recv().await {
                task.await;
                worker_stats.write().completed += 1;
            }
            debug!("Action serializer worker stopped");
        });

        Self {
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            stats,
        }
    }

    /// Submit a task and wait for its result. Tasks run strictly in
    /// submission order, one at a time.
    pub async fn run<T, F>(&self, task: F) -> Result<T, SerializerClosed>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        self.enqueue(Box::pin(async move {
            let _ = done_tx.send(task.await);
        }))?;
        done_rx.await.map_err(|_| SerializerClosed)
    }

    /// Submit a task without waiting for completion.
    pub fn submit<F>(&self, task: F) -> Result<(), SerializerClosed>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.enqueue(Box::pin(task))
    }

    fn enqueue(&self, task: Task) -> Result<(), SerializerClosed> {
        let tx = self.tx.lock();
        let tx = tx.as_ref().ok_or(SerializerClosed)?;
        tx.send(task).map_err(|_| SerializerClosed)?;
        self.stats.write().submitted += 1;
        Ok(())
    }

    pub fn stats(&self) -> SerializerStats {
        *self.stats.read()
    }

    /// Stop accepting work and wait for the queue to drain.
    pub async fn shutdown(&self) {
        drop(self.tx.lock().take());
        let worker = self.worker.lock().take();
        if let Some(handle) = worker {
            let _ = handle.await;
        }
    }
}

impl Default for ActionSerializer {
    fn default() -> Self {
        Self::new()
    }
}
