use chrono::Datelike;
use deployer_core::{Credentials, RunMode, TaskRequest};
use generator::ContentGenerator;
use tracing::{debug, info};
use vcs::Workspace;

use crate::attachments;
use crate::error::{OrchestratorError, Result};
use crate::templates::{self, CONTENT_FILE, LICENSE_FILE, README_FILE};

/// Fills a workspace with the files for one round.
#[derive(Clone)]
pub struct WorkspaceBuilder {
    generator: ContentGenerator,
}

impl WorkspaceBuilder {
    pub fn new(generator: ContentGenerator) -> Self {
        Self { generator }
    }

    pub async fn prepare(
        &self,
        workspace: &Workspace,
        task: &TaskRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        match task.mode()? {
            RunMode::Create => self.prepare_initial(workspace, task, credentials).await,
            RunMode::Update { round } => {
                self.prepare_revision(workspace, task, credentials, round)
                    .await
            }
        }
    }

    async fn prepare_initial(
        &self,
        workspace: &Workspace,
        task: &TaskRequest,
        credentials: &Credentials,
    ) -> Result<()> {
        let content = self
            .generator
            .generate(&credentials.gemini_api_key, &task.brief, None)
            .await?;

        tokio::fs::write(workspace.file(CONTENT_FILE), content).await?;
        tokio::fs::write(workspace.file(README_FILE), templates::readme(task)).await?;

        let year = chrono::Utc::now().year();
        tokio::fs::write(
            workspace.file(LICENSE_FILE),
            templates::mit_license(year, &credentials.github_username),
        )
        .await?;

        for attachment in &task.attachments {
            attachments::materialize(workspace, attachment).await?;
        }

        info!(
            path = %workspace.path.display(),
            attachments = task.attachments.len(),
            "Workspace prepared for initial round"
        );
        Ok(())
    }

    async fn prepare_revision(
        &self,
        workspace: &Workspace,
        task: &TaskRequest,
        credentials: &Credentials,
        round: u32,
    ) -> Result<()> {
        let content_path = workspace.file(CONTENT_FILE);
        match tokio::fs::metadata(&content_path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(OrchestratorError::MissingContent(content_path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OrchestratorError::MissingContent(content_path));
            }
            Err(e) => return Err(e.into()),
        }

        let existing = tokio::fs::read_to_string(&content_path).await?;
        debug!(round, chars = existing.len(), "Read existing content");

        let revised = self
            .generator
            .generate(&credentials.gemini_api_key, &task.brief, Some(&existing))
            .await?;

        tokio::fs::write(&content_path, revised).await?;

        info!(round, path = %content_path.display(), "Content revised");
        Ok(())
    }
}
