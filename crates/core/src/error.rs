use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Required configuration is not set: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid round: {0} (rounds start at 1)")]
    InvalidRound(u32),

    #[error("Invalid task identifier: {0:?}")]
    InvalidTaskId(String),

    #[error("Invalid attachment name: {0:?}")]
    InvalidAttachmentName(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::MissingConfig("GITHUB_TOKEN");
        assert!(error.to_string().contains("GITHUB_TOKEN"));

        let error = CoreError::InvalidTaskId("../etc".to_string());
        assert!(error.to_string().contains("../etc"));
    }
}
