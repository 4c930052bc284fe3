use serde::{Deserialize, Serialize};

// =============================================================================
// Repository coordinates
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    pub owner: String,
    pub repo: String,
}

impl RepoConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }

    /// GitHub Pages address for a user-owned project site.
    ///
    /// Derived from the coordinates alone; the Pages API is never asked.
    pub fn pages_url(&self) -> String {
        format!("https://{}.github.io/{}/", self.owner, self.repo)
    }

    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}/{}.git", self.owner, self.repo)
    }

    /// HTTPS remote with the token embedded: `https://<owner>:<token>@github.com/...`.
    pub fn authenticated_remote_url(&self, token: &str) -> String {
        format!(
            "https://{}:{}@github.com/{}/{}.git",
            urlencoding::encode(&self.owner),
            urlencoding::encode(token),
            self.owner,
            self.repo
        )
    }
}

// =============================================================================
// Create repository
// =============================================================================

/// Body of `POST /user/repos`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateRepoRequest {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            private: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
}

// =============================================================================
// GitHub Pages
// =============================================================================

/// Body of `POST /repos/{owner}/{repo}/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct EnablePagesRequest {
    pub source: PagesSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesSource {
    pub branch: String,
    pub path: String,
}

impl EnablePagesRequest {
    /// Serve `branch` from the repository root.
    pub fn from_branch_root(branch: impl Into<String>) -> Self {
        Self {
            source: PagesSource {
                branch: branch.into(),
                path: "/".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesSite {
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
