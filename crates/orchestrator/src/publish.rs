use deployer_core::PublishResult;
use github::{CreateRepoRequest, EnablePagesRequest, HostingPlatform, RepoConfig};
use std::sync::Arc;
use tracing::info;
use vcs::{RepositoryOps, Workspace};

use crate::error::Result;

const REMOTE: &str = "origin";
const INITIAL_COMMIT_MESSAGE: &str = "feat: Initial commit for Round 1";

/// Sequences repository and hosting actions for a round.
///
/// Nothing is rolled back: a failed step leaves earlier steps in effect.
#[derive(Clone)]
pub struct PublishDriver {
    repo_ops: Arc<dyn RepositoryOps>,
    host: Arc<dyn HostingPlatform>,
}

impl PublishDriver {
    pub fn new(repo_ops: Arc<dyn RepositoryOps>, host: Arc<dyn HostingPlatform>) -> Self {
        Self { repo_ops, host }
    }

    /// Round 1: commit the prepared workspace, create the remote repository,
    /// push and turn on Pages.
    pub async fn create(
        &self,
        workspace: &Workspace,
        repo: &RepoConfig,
        token: &str,
    ) -> Result<PublishResult> {
        info!(backend = self.repo_ops.name(), repo = %repo.repo, "Publishing new repository");

        self.repo_ops.init(workspace).await?;
        self.repo_ops.stage_all(workspace).await?;
        let commit_sha = self
            .repo_ops
            .commit(workspace, INITIAL_COMMIT_MESSAGE)
            .await?;

        let request = CreateRepoRequest::public(&repo.repo)
            .with_description(format!("Generated site for task {}", workspace.task_id));
        self.host.create_repository(token, &request).await?;

        self.repo_ops
            .set_remote(workspace, REMOTE, &repo.authenticated_remote_url(token))
            .await?;
        self.repo_ops.push(workspace, REMOTE).await?;

        let pages = EnablePagesRequest::from_branch_root(&workspace.branch_name);
        self.host.enable_pages(token, repo, &pages).await?;

        Ok(Self::result(repo, commit_sha))
    }

    /// Round 2 and later, before the builder runs: fetch the published
    /// repository and make `origin` pushable.
    pub async fn checkout(&self, workspace: &Workspace, repo: &RepoConfig, token: &str) -> Result<()> {
        info!(repo = %repo.repo, "Cloning published repository");

        (*self.repo_ops).clone_into(workspace, &repo.clone_url()).await?;
        self.repo_ops
            .set_remote(workspace, REMOTE, &repo.authenticated_remote_url(token))
            .await?;
        Ok(())
    }

    /// Round 2 and later, after the builder runs: commit and push the revision.
    pub async fn update(
        &self,
        workspace: &Workspace,
        repo: &RepoConfig,
        round: u32,
    ) -> Result<PublishResult> {
        self.repo_ops.stage_all(workspace).await?;
        let commit_sha = self
            .repo_ops
            .commit(workspace, &format!("feat: Round {} update", round))
            .await?;
        self.repo_ops.push(workspace, REMOTE).await?;

        info!(repo = %repo.repo, round, commit = %commit_sha, "Revision pushed");
        Ok(Self::result(repo, commit_sha))
    }

    fn result(repo: &RepoConfig, commit_sha: String) -> PublishResult {
        PublishResult {
            repo_url: repo.html_url(),
            pages_url: repo.pages_url(),
            commit_sha,
        }
    }
}
