use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CoreError, Result};

pub const SECRET_VAR: &str = "MY_SECRET";
pub const GITHUB_USERNAME_VAR: &str = "GITHUB_USERNAME";
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Process-wide settings, built once at startup and shared read-only.
///
/// Credentials stay optional here: a missing value fails the run that needs it,
/// not the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployerConfig {
    #[serde(skip)]
    pub secret: Option<String>,
    #[serde(skip)]
    pub github_username: Option<String>,
    #[serde(skip)]
    pub github_token: Option<String>,
    #[serde(skip)]
    pub gemini_api_key: Option<String>,

    /// Directory under which per-task workspaces are created.
    pub workspace_root: PathBuf,
    /// Prefix for both the repository name and the workspace directory.
    pub repo_prefix: String,
    pub default_branch: String,
    pub commit_author_name: String,
    pub commit_author_email: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub github_api_url: String,
    pub notify_timeout_secs: u64,
    pub workers: usize,
    pub queue_capacity: usize,
    /// Largest accepted task body; attachments arrive inline as base64.
    pub max_body_bytes: usize,
}

impl Default for DeployerConfig {
    fn default() -> Self {
        Self {
            secret: None,
            github_username: None,
            github_token: None,
            gemini_api_key: None,
            workspace_root: PathBuf::from("."),
            repo_prefix: "tds-proj-".to_string(),
            default_branch: "main".to_string(),
            commit_author_name: "site-deployer".to_string(),
            commit_author_email: "site-deployer@users.noreply.github.com".to_string(),
            gemini_model: "gemini-pro-latest".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            github_api_url: "https://api.github.com".to_string(),
            notify_timeout_secs: 20,
            workers: 4,
            queue_capacity: 64,
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Credentials confirmed present for a single run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub secret: String,
    pub github_username: String,
    pub github_token: String,
    pub gemini_api_key: String,
}

impl DeployerConfig {
    /// Fills the credential fields from a variable lookup; empty values count as unset.
    pub fn with_credentials_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        self.secret = read(SECRET_VAR);
        self.github_username = read(GITHUB_USERNAME_VAR);
        self.github_token = read(GITHUB_TOKEN_VAR);
        self.gemini_api_key = read(GEMINI_API_KEY_VAR);
        self
    }

    pub fn with_credentials_from_env(self) -> Self {
        self.with_credentials_from(|name| std::env::var(name).ok())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials {
            secret: require(&self.secret, SECRET_VAR)?,
            github_username: require(&self.github_username, GITHUB_USERNAME_VAR)?,
            github_token: require(&self.github_token, GITHUB_TOKEN_VAR)?,
            gemini_api_key: require(&self.gemini_api_key, GEMINI_API_KEY_VAR)?,
        })
    }

    /// Names of the required variables that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            (SECRET_VAR, &self.secret),
            (GITHUB_USERNAME_VAR, &self.github_username),
            (GITHUB_TOKEN_VAR, &self.github_token),
            (GEMINI_API_KEY_VAR, &self.gemini_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Shared-secret check used by the front door; an unset secret never matches.
    pub fn secret_matches(&self, provided: &str) -> bool {
        self.secret.as_deref() == Some(provided)
    }

    pub fn repo_name(&self, task_id: &str) -> String {
        format!("{}{}", self.repo_prefix, task_id)
    }
}

fn require(value: &Option<String>, name: &'static str) -> Result<String> {
    value.clone().ok_or(CoreError::MissingConfig(name))
}
