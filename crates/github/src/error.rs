use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                if source.status_code.as_u16() == 401 {
                    GitHubError::Authentication(source.message.clone())
                } else {
                    GitHubError::Api(source.message.clone())
                }
            }
            _ => GitHubError::Api(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;
