use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::error::{GitHubError, Result};
use crate::platform::HostingPlatform;
use crate::types::{CreateRepoRequest, EnablePagesRequest, PagesSite, RepoConfig, Repository};

const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST client for the repository and Pages endpoints.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_uri: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl GitHubClient {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn octocrab(&self, token: &str) -> Result<Octocrab> {
        Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(self.base_uri.as_str())
            .map_err(|e| GitHubError::Config(e.to_string()))?
            .build()
            .map_err(|e| GitHubError::Config(e.to_string()))
    }
}

#[async_trait]
impl HostingPlatform for GitHubClient {
    async fn create_repository(
        &self,
        token: &str,
        request: &CreateRepoRequest,
    ) -> Result<Repository> {
        info!(name = %request.name, private = request.private, "Creating repository");

        let repo: Repository = self
            .octocrab(token)?
            .post("/user/repos", Some(request))
            .await?;

        debug!(full_name = %repo.full_name, "Repository created");
        Ok(repo)
    }

    async fn enable_pages(
        &self,
        token: &str,
        repo: &RepoConfig,
        request: &EnablePagesRequest,
    ) -> Result<PagesSite> {
        info!(
            "Enabling Pages for {}/{} (branch {}, path {})",
            repo.owner, repo.repo, request.source.branch, request.source.path
        );

        let route = format!("/repos/{}/{}/pages", repo.owner, repo.repo);
        let site: PagesSite = self.octocrab(token)?.post(route, Some(request)).await?;

        debug!(status = ?site.status, "Pages enabled");
        Ok(site)
    }
}
