//! Task orchestration for deployed sites
//!
//! - **Runner**: the per-task state machine (validate, build, publish, notify, clean up)
//! - **Builder**: writes generated content and project files into a workspace
//! - **Publish**: sequences repository and hosting actions for a round
//! - **Notifier**: reports results to the evaluator with retry and backoff
//! - **Dispatch**: bounded queue and worker pool in front of the runner

pub mod attachments;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod notifier;
pub mod publish;
pub mod runner;
pub mod templates;

pub use builder::WorkspaceBuilder;
pub use dispatch::{DispatchError, TaskHandler, TaskQueue, WorkerPool};
pub use error::{OrchestratorError, Result};
pub use notifier::{Notifier, RetryPolicy};
pub use publish::PublishDriver;
pub use runner::{RunOutcome, TaskOrchestrator};
