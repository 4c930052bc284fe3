use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{CoreError, Result};

/// A file shipped with a task, encoded as a `data:` URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Attachment {
    pub name: String,
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Attachments are written straight into the workspace, so the name must be
    /// a single path component.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        let is_plain = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\')
            && !name.contains('\0');

        if is_plain {
            Ok(())
        } else {
            Err(CoreError::InvalidAttachmentName(self.name.clone()))
        }
    }
}

/// Inbound unit of work: a site brief for a given revision round.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskRequest {
    pub email: String,
    pub secret: String,
    pub task: String,
    pub round: u32,
    pub nonce: String,
    pub brief: String,
    pub evaluation_url: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl TaskRequest {
    pub fn mode(&self) -> Result<RunMode> {
        RunMode::from_round(self.round)
    }

    pub fn secret_matches(&self, expected: &str) -> bool {
        self.secret == expected
    }

    /// Checks everything that later turns into a path or a repository name.
    pub fn validate(&self) -> Result<()> {
        self.mode()?;

        let id = self.task.as_str();
        let valid_id = !id.is_empty()
            && !id.starts_with('.')
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid_id {
            return Err(CoreError::InvalidTaskId(self.task.clone()));
        }

        for attachment in &self.attachments {
            attachment.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Round 1: build the site and create the repository.
    Create,
    /// Round 2 and later: revise the published site.
    Update { round: u32 },
}

impl RunMode {
    pub fn from_round(round: u32) -> Result<Self> {
        match round {
            0 => Err(CoreError::InvalidRound(round)),
            1 => Ok(Self::Create),
            round => Ok(Self::Update { round }),
        }
    }

    pub fn round(&self) -> u32 {
        match self {
            Self::Create => 1,
            Self::Update { round } => *round,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update { .. } => "update",
        }
    }
}
