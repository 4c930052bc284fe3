use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::Result;

/// Local directory owned by a single task run.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub task_id: String,
    pub path: PathBuf,
    pub branch_name: String,
}

impl Workspace {
    pub fn new(task_id: impl Into<String>, path: PathBuf, branch_name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            path,
            branch_name: branch_name.into(),
        }
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Repository actions the publish flow sequences.
///
/// Every call runs inside the workspace directory and blocks until the
/// underlying tool returns; a failure is final for the run.
#[async_trait]
pub trait RepositoryOps: Send + Sync {
    /// Name of the backend, for logging
    fn name(&self) -> &'static str;

    /// Initialize an empty repository on the workspace branch
    async fn init(&self, workspace: &Workspace) -> Result<()>;

    /// Stage every change in the workspace
    async fn stage_all(&self, workspace: &Workspace) -> Result<()>;

    /// Commit staged changes and return the new commit id
    async fn commit(&self, workspace: &Workspace, message: &str) -> Result<String>;

    /// Point `remote` at `url`, adding it if it does not exist yet
    async fn set_remote(&self, workspace: &Workspace, remote: &str, url: &str) -> Result<()>;

    /// Push the workspace branch to `remote` and track it
    async fn push(&self, workspace: &Workspace, remote: &str) -> Result<()>;

    /// Clone `url` into the (empty) workspace directory
    async fn clone_into(&self, workspace: &Workspace, url: &str) -> Result<()>;
}
