use async_trait::async_trait;
use deployer_core::TaskRequest;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::runner::TaskOrchestrator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Task queue is full")]
    QueueFull,

    #[error("Task queue is closed")]
    Closed,
}

/// Something that consumes accepted tasks.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn handle(&self, task: TaskRequest);
}

#[async_trait]
impl TaskHandler for TaskOrchestrator {
    async fn handle(&self, task: TaskRequest) {
        self.run(task).await;
    }
}

/// Producer side of the bounded task queue.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    sender: mpsc::Sender<TaskRequest>,
}

impl TaskQueue {
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<TaskRequest>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Enqueues without waiting; a full queue is reported, not awaited.
    pub fn submit(&self, task: TaskRequest) -> Result<(), DispatchError> {
        self.sender.try_send(task).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DispatchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}

/// Fixed set of workers draining one queue.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn spawn(
        handler: Arc<dyn TaskHandler>,
        receiver: mpsc::Receiver<TaskRequest>,
        workers: usize,
    ) -> Self {
        let receiver = Arc::new(Mutex::new(receiver));
        let workers = workers.max(1);

        let handles = (0..workers)
            .map(|worker| {
                let handler = handler.clone();
                let receiver = receiver.clone();
                tokio::spawn(async move {
                    loop {
                        let next = receiver.lock().await.recv().await;
                        let Some(task) = next else {
                            debug!(worker, "Queue closed, worker exiting");
                            break;
                        };
                        let task_id = task.task.clone();
                        debug!(worker, task = %task_id, "Worker picked up task");

                        // A panicking run must not take the worker down with it.
                        let handler = handler.clone();
                        let run = tokio::spawn(async move { handler.handle(task).await });
                        if let Err(e) = run.await {
                            error!(worker, task = %task_id, error = %e, "Task run panicked");
                        }
                    }
                })
            })
            .collect();

        info!(workers, "Worker pool started");
        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker; they exit once all queue senders are dropped.
    pub async fn join(self) {
        for (worker, handle) in self.handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                error!(worker, error = %e, "Worker terminated abnormally");
            }
        }
    }
}
