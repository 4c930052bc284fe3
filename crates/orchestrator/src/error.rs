use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("{0}")]
    Core(#[from] deployer_core::CoreError),

    #[error("Content generation failed: {0}")]
    Generation(#[from] generator::GenerationError),

    #[error("Version control failed: {0}")]
    Vcs(#[from] vcs::VcsError),

    #[error("Hosting platform failed: {0}")]
    Hosting(#[from] github::GitHubError),

    #[error("Attachment {name} could not be materialized: {reason}")]
    Attachment { name: String, reason: String },

    #[error("Content file missing from workspace: {0}")]
    MissingContent(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrchestratorError {
    pub fn attachment(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Attachment {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Short label for the failure category, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Core(deployer_core::CoreError::MissingConfig(_)) => "configuration",
            Self::Core(_) => "validation",
            Self::Generation(_) => "generation",
            Self::Vcs(_) | Self::Hosting(_) => "publish",
            Self::Attachment { .. } | Self::MissingContent(_) | Self::Io(_) => "workspace",
        }
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let missing = OrchestratorError::from(deployer_core::CoreError::MissingConfig("MY_SECRET"));
        assert_eq!(missing.kind(), "configuration");

        let invalid = OrchestratorError::from(deployer_core::CoreError::InvalidRound(0));
        assert_eq!(invalid.kind(), "validation");

        let vcs = OrchestratorError::from(vcs::VcsError::CommandFailed("push".to_string()));
        assert_eq!(vcs.kind(), "publish");

        let attachment = OrchestratorError::attachment("data.csv", "no comma");
        assert_eq!(attachment.kind(), "workspace");
        assert!(attachment.to_string().contains("data.csv"));
    }
}
