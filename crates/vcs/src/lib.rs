pub mod error;
pub mod git;
pub mod traits;
pub mod workspace;

pub use error::{Result, VcsError};
pub use git::{redact_credentials, GitVcs};
pub use traits::{RepositoryOps, Workspace};
pub use workspace::WorkspaceManager;
