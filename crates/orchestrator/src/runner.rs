use deployer_core::{DeployerConfig, NotificationPayload, PublishResult, RunMode, TaskRequest};
use github::RepoConfig;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;
use vcs::WorkspaceManager;

use crate::builder::WorkspaceBuilder;
use crate::error::Result;
use crate::notifier::Notifier;
use crate::publish::PublishDriver;

/// How a run ended when no step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The shared secret did not match; nothing was touched.
    Rejected,
    /// The site was published; `notified` reports whether the evaluator acknowledged it.
    Completed {
        publish: PublishResult,
        notified: bool,
    },
}

/// Drives one task from validation to cleanup.
pub struct TaskOrchestrator {
    config: Arc<DeployerConfig>,
    workspaces: WorkspaceManager,
    builder: WorkspaceBuilder,
    publisher: PublishDriver,
    notifier: Notifier,
}

impl TaskOrchestrator {
    pub fn new(
        config: Arc<DeployerConfig>,
        builder: WorkspaceBuilder,
        publisher: PublishDriver,
        notifier: Notifier,
    ) -> Self {
        let workspaces =
            WorkspaceManager::new(config.workspace_root.clone(), config.default_branch.clone());
        Self {
            config,
            workspaces,
            builder,
            publisher,
            notifier,
        }
    }

    /// Runs the task to completion. Every failure is logged here and goes no further.
    pub async fn run(&self, task: TaskRequest) {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "task_run",
            run_id = %run_id,
            task = %task.task,
            round = task.round
        );

        async {
            match self.execute(&task).await {
                Ok(RunOutcome::Rejected) => {
                    warn!("Task rejected: secret mismatch");
                }
                Ok(RunOutcome::Completed { publish, notified }) => {
                    info!(
                        repo_url = %publish.repo_url,
                        pages_url = %publish.pages_url,
                        commit = %publish.commit_sha,
                        notified,
                        "Task run completed"
                    );
                }
                Err(e) => {
                    error!(kind = e.kind(), error = %e, "Task run aborted");
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Runs the task and returns how it ended.
    ///
    /// On error the workspace, if one was created, is left in place.
    pub async fn execute(&self, task: &TaskRequest) -> Result<RunOutcome> {
        let credentials = self.config.credentials()?;

        if !task.secret_matches(&credentials.secret) {
            return Ok(RunOutcome::Rejected);
        }

        task.validate()?;
        let mode = task.mode()?;

        let repo_name = self.config.repo_name(&task.task);
        let repo = RepoConfig::new(&credentials.github_username, &repo_name);
        let workspace = self.workspaces.setup_workspace(&task.task, &repo_name).await?;
        info!(mode = mode.as_str(), path = %workspace.path.display(), "Workspace ready");

        let publish = match mode {
            RunMode::Create => {
                self.builder.prepare(&workspace, task, &credentials).await?;
                self.publisher
                    .create(&workspace, &repo, &credentials.github_token)
                    .await?
            }
            RunMode::Update { round } => {
                self.publisher
                    .checkout(&workspace, &repo, &credentials.github_token)
                    .await?;
                self.builder.prepare(&workspace, task, &credentials).await?;
                self.publisher.update(&workspace, &repo, round).await?
            }
        };

        let payload = NotificationPayload::new(task, &publish);
        let notified = self.notifier.notify(&payload).await;

        if let Err(e) = self.workspaces.cleanup_workspace(&workspace).await {
            warn!(error = %e, "Failed to remove workspace after run");
        }

        Ok(RunOutcome::Completed { publish, notified })
    }
}
