use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreateRepoRequest, EnablePagesRequest, PagesSite, RepoConfig, Repository};

/// Hosting-platform actions used when a site is first published.
///
/// The token is passed per call: credentials are checked per run, so a client
/// can exist before they are known.
#[async_trait]
pub trait HostingPlatform: Send + Sync {
    /// Create a repository owned by the authenticated user
    async fn create_repository(&self, token: &str, request: &CreateRepoRequest)
        -> Result<Repository>;

    /// Turn on static hosting for an existing repository
    async fn enable_pages(
        &self,
        token: &str,
        repo: &RepoConfig,
        request: &EnablePagesRequest,
    ) -> Result<PagesSite>;
}
