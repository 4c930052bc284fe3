use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{Result, VcsError};
use crate::traits::Workspace;

/// Creates and removes per-task workspaces under a fixed base directory.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    workspace_base: PathBuf,
    branch: String,
}

impl WorkspaceManager {
    pub fn new(workspace_base: PathBuf, branch: impl Into<String>) -> Self {
        Self {
            workspace_base,
            branch: branch.into(),
        }
    }

    pub fn workspace_path(&self, dir_name: &str) -> PathBuf {
        self.workspace_base.join(dir_name)
    }

    /// Returns an empty directory for the task, wiping whatever a previous run
    /// left at the same path.
    pub async fn setup_workspace(&self, task_id: &str, dir_name: &str) -> Result<Workspace> {
        let path = self.workspace_path(dir_name);

        if path.file_name().is_none() || dir_name.is_empty() {
            return Err(VcsError::InvalidPath(path.display().to_string()));
        }

        if path.exists() {
            warn!(path = %path.display(), "Removing stale workspace");
            tokio::fs::remove_dir_all(&path).await?;
        }

        tokio::fs::create_dir_all(&path).await?;
        debug!(path = %path.display(), "Workspace directory created");

        Ok(Workspace::new(task_id, path, self.branch.clone()))
    }

    pub async fn cleanup_workspace(&self, workspace: &Workspace) -> Result<()> {
        if workspace.path.exists() {
            tokio::fs::remove_dir_all(&workspace.path).await?;
        }

        info!("Workspace cleaned up: {}", workspace.task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_workspace_path() {
        let manager = WorkspaceManager::new(PathBuf::from("/workspaces"), "main");
        assert_eq!(
            manager.workspace_path("tds-proj-123"),
            PathBuf::from("/workspaces/tds-proj-123")
        );
    }

    #[tokio::test]
    async fn test_setup_creates_empty_directory() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(base.path().to_path_buf(), "main");

        let ws = manager.setup_workspace("abc", "site-abc").await.unwrap();

        assert!(ws.path.is_dir());
        assert_eq!(ws.task_id, "abc");
        assert_eq!(ws.branch_name, "main");
        assert_eq!(std::fs::read_dir(&ws.path).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_setup_purges_stale_contents() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(base.path().to_path_buf(), "main");
        let stale = base.path().join("site-abc");
        std::fs::create_dir_all(stale.join("nested")).unwrap();
        std::fs::write(stale.join("nested/old.txt"), "old").unwrap();

        let ws = manager.setup_workspace("abc", "site-abc").await.unwrap();

        assert!(ws.path.is_dir());
        assert!(!ws.path.join("nested").exists());
    }

    #[tokio::test]
    async fn test_cleanup_removes_directory() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(base.path().to_path_buf(), "main");
        let ws = manager.setup_workspace("abc", "site-abc").await.unwrap();
        std::fs::write(ws.path.join("index.html"), "x").unwrap();

        manager.cleanup_workspace(&ws).await.unwrap();
        assert!(!ws.path.exists());

        // Already gone is fine.
        manager.cleanup_workspace(&ws).await.unwrap();
    }

    #[tokio::test]
    async fn test_setup_rejects_empty_name() {
        let base = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(base.path().to_path_buf(), "main");
        let result = manager.setup_workspace("abc", "").await;
        assert!(matches!(result, Err(VcsError::InvalidPath(_))));
    }
}
